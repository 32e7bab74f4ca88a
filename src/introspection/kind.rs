//! Single-character catalog kind tags and their closed classifications.

/// Relation kind of a catalog class (`pg_class.relkind`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    OrdinaryTable,
    Index,
    Sequence,
    ToastTable,
    View,
    MaterializedView,
    CompositeType,
    ForeignTable,
    PartitionedTable,
    PartitionedIndex,
}

impl ClassKind {
    /// Classify a `relkind` tag. Returns `None` for tags the catalog does not define.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'r' => Some(ClassKind::OrdinaryTable),
            'i' => Some(ClassKind::Index),
            'S' => Some(ClassKind::Sequence),
            't' => Some(ClassKind::ToastTable),
            'v' => Some(ClassKind::View),
            'm' => Some(ClassKind::MaterializedView),
            'c' => Some(ClassKind::CompositeType),
            'f' => Some(ClassKind::ForeignTable),
            'p' => Some(ClassKind::PartitionedTable),
            'I' => Some(ClassKind::PartitionedIndex),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            ClassKind::OrdinaryTable => 'r',
            ClassKind::Index => 'i',
            ClassKind::Sequence => 'S',
            ClassKind::ToastTable => 't',
            ClassKind::View => 'v',
            ClassKind::MaterializedView => 'm',
            ClassKind::CompositeType => 'c',
            ClassKind::ForeignTable => 'f',
            ClassKind::PartitionedTable => 'p',
            ClassKind::PartitionedIndex => 'I',
        }
    }
}

/// Semantic kind of a table constraint (`pg_constraint.contype`)
///
/// The mapping from tag to kind is closed: every projected constraint is exactly one of
/// these five, and anything else is rejected by the caller of [`ConstraintKind::from_tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Check,
    Unique,
    Exclusion,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 5] = [
        ConstraintKind::PrimaryKey,
        ConstraintKind::ForeignKey,
        ConstraintKind::Check,
        ConstraintKind::Unique,
        ConstraintKind::Exclusion,
    ];

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'p' => Some(ConstraintKind::PrimaryKey),
            'f' => Some(ConstraintKind::ForeignKey),
            'c' => Some(ConstraintKind::Check),
            'u' => Some(ConstraintKind::Unique),
            'x' => Some(ConstraintKind::Exclusion),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            ConstraintKind::PrimaryKey => 'p',
            ConstraintKind::ForeignKey => 'f',
            ConstraintKind::Check => 'c',
            ConstraintKind::Unique => 'u',
            ConstraintKind::Exclusion => 'x',
        }
    }
}
