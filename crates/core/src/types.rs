//! Element handles and element types.

use std::fmt;

// =============================================================================
// Handle
// =============================================================================

/// Opaque reference to an element (node, link or connector) in the store.
///
/// The raw value `0` is reserved as the invalid sentinel; stores never hand
/// it out for a real element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(u64);

impl Handle {
    /// The "no such element" sentinel.
    pub const INVALID: Handle = Handle(0);

    /// Wrap a raw store value.
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    /// Raw store value.
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Whether this handle refers to an element at all.
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// ElementType
// =============================================================================

/// Bit-set describing the kind of a store element.
///
/// Concrete elements carry `CONST` (or `VAR`) plus one kind bit and any
/// subkind bits. Template wildcards use the `VAR_*` constants, which match
/// every element carrying at least the requested kind bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ElementType(u16);

impl ElementType {
    const NODE: u16 = 0x0001;
    const LINK: u16 = 0x0002;
    const COMMON_ARC: u16 = 0x0004;
    const MEMBERSHIP_ARC: u16 = 0x0008;

    const CONST: u16 = 0x0020;
    const VAR: u16 = 0x0040;

    const POS: u16 = 0x0080;
    const PERM: u16 = 0x0100;

    const STRUCTURE: u16 = 0x0200;
    const ROLE: u16 = 0x0400;
    const NON_ROLE: u16 = 0x0800;
    const CLASS: u16 = 0x1000;

    const CONSTANCY: u16 = Self::CONST | Self::VAR;
    const KIND: u16 = Self::NODE | Self::LINK | Self::COMMON_ARC | Self::MEMBERSHIP_ARC;

    /// Matches any element.
    pub const UNKNOWN: ElementType = ElementType(0);

    pub const CONST_NODE: ElementType = ElementType(Self::NODE | Self::CONST);
    pub const CONST_NODE_STRUCTURE: ElementType =
        ElementType(Self::NODE | Self::CONST | Self::STRUCTURE);
    pub const CONST_NODE_ROLE: ElementType = ElementType(Self::NODE | Self::CONST | Self::ROLE);
    pub const CONST_NODE_NON_ROLE: ElementType =
        ElementType(Self::NODE | Self::CONST | Self::NON_ROLE);
    pub const CONST_NODE_CLASS: ElementType = ElementType(Self::NODE | Self::CONST | Self::CLASS);
    pub const CONST_NODE_LINK: ElementType = ElementType(Self::LINK | Self::CONST);
    pub const CONST_PERM_POS_ARC: ElementType =
        ElementType(Self::MEMBERSHIP_ARC | Self::CONST | Self::POS | Self::PERM);
    pub const CONST_COMMON_ARC: ElementType = ElementType(Self::COMMON_ARC | Self::CONST);

    pub const VAR_NODE: ElementType = ElementType(Self::NODE | Self::VAR);
    pub const VAR_NODE_STRUCTURE: ElementType =
        ElementType(Self::NODE | Self::VAR | Self::STRUCTURE);
    pub const VAR_NODE_ROLE: ElementType = ElementType(Self::NODE | Self::VAR | Self::ROLE);
    pub const VAR_NODE_NON_ROLE: ElementType =
        ElementType(Self::NODE | Self::VAR | Self::NON_ROLE);
    pub const VAR_NODE_LINK: ElementType = ElementType(Self::LINK | Self::VAR);
    pub const VAR_PERM_POS_ARC: ElementType =
        ElementType(Self::MEMBERSHIP_ARC | Self::VAR | Self::POS | Self::PERM);
    pub const VAR_COMMON_ARC: ElementType = ElementType(Self::COMMON_ARC | Self::VAR);

    /// Raw bits, mostly useful for diagnostics.
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Whether this is [`ElementType::UNKNOWN`].
    pub const fn is_unknown(&self) -> bool {
        self.0 == 0
    }

    /// Node or link.
    pub const fn is_node(&self) -> bool {
        self.0 & (Self::NODE | Self::LINK) != 0
    }

    pub const fn is_link(&self) -> bool {
        self.0 & Self::LINK != 0
    }

    /// Any arc kind.
    pub const fn is_connector(&self) -> bool {
        self.0 & (Self::COMMON_ARC | Self::MEMBERSHIP_ARC) != 0
    }

    pub const fn is_membership_arc(&self) -> bool {
        self.0 & Self::MEMBERSHIP_ARC != 0
    }

    /// The "structure" predicate used to gate structure sets.
    pub const fn is_structure(&self) -> bool {
        self.is_node() && self.0 & Self::STRUCTURE != 0
    }

    pub const fn is_role(&self) -> bool {
        self.0 & Self::ROLE != 0
    }

    pub const fn is_const(&self) -> bool {
        self.0 & Self::CONST != 0
    }

    pub const fn is_var(&self) -> bool {
        self.0 & Self::VAR != 0
    }

    /// Constant counterpart of a variable type.
    pub const fn to_const(self) -> ElementType {
        ElementType((self.0 & !Self::VAR) | Self::CONST)
    }

    /// Whether an element of type `actual` satisfies this type used as a
    /// template wildcard.
    pub fn matches(&self, actual: ElementType) -> bool {
        if self.is_unknown() {
            return true;
        }
        let requested = self.0 & !Self::CONSTANCY;
        if actual.0 & requested != requested {
            return false;
        }
        !self.is_const() || actual.is_const()
    }

    /// Whether the type names exactly one element kind, as required for
    /// generating a new element.
    pub fn is_concrete(&self) -> bool {
        (self.0 & Self::KIND).count_ones() == 1
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementType({})", self)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return f.write_str("UNKNOWN");
        }
        const NAMES: [(u16, &str); 12] = [
            (ElementType::CONST, "CONST"),
            (ElementType::VAR, "VAR"),
            (ElementType::PERM, "PERM"),
            (ElementType::POS, "POS"),
            (ElementType::NODE, "NODE"),
            (ElementType::LINK, "LINK"),
            (ElementType::COMMON_ARC, "COMMON_ARC"),
            (ElementType::MEMBERSHIP_ARC, "ARC"),
            (ElementType::STRUCTURE, "STRUCTURE"),
            (ElementType::ROLE, "ROLE"),
            (ElementType::NON_ROLE, "NON_ROLE"),
            (ElementType::CLASS, "CLASS"),
        ];
        let parts: Vec<&str> = NAMES
            .iter()
            .filter(|(bit, _)| self.0 & bit != 0)
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&parts.join("_"))
    }
}
