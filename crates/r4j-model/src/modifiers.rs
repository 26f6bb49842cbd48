//! JVM access flags.
//!
//! The bit values match the class-file format; `VOLATILE`/`BRIDGE` and
//! `TRANSIENT`/`VARARGS` share bits and are told apart by the kind of element
//! carrying them.
use std::fmt;
use std::ops::BitOr;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_PROTECTED: u16 = 0x0004;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_SYNCHRONIZED: u16 = 0x0020;
pub const ACC_VOLATILE: u16 = 0x0040;
pub const ACC_BRIDGE: u16 = 0x0040;
pub const ACC_TRANSIENT: u16 = 0x0080;
pub const ACC_VARARGS: u16 = 0x0080;
pub const ACC_NATIVE: u16 = 0x0100;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;
pub const ACC_SYNTHETIC: u16 = 0x1000;
pub const ACC_ANNOTATION: u16 = 0x2000;
pub const ACC_ENUM: u16 = 0x4000;

const VISIBILITY: u16 = ACC_PUBLIC | ACC_PRIVATE | ACC_PROTECTED;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u16);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const PUBLIC: Modifiers = Modifiers(ACC_PUBLIC);
    pub const PRIVATE: Modifiers = Modifiers(ACC_PRIVATE);
    pub const PROTECTED: Modifiers = Modifiers(ACC_PROTECTED);
    pub const STATIC: Modifiers = Modifiers(ACC_STATIC);
    pub const FINAL: Modifiers = Modifiers(ACC_FINAL);
    pub const ABSTRACT: Modifiers = Modifiers(ACC_ABSTRACT);

    pub const fn from_bits(bits: u16) -> Self {
        Modifiers(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, flags: u16) -> bool {
        self.0 & flags == flags
    }

    pub const fn with(self, flags: u16) -> Self {
        Modifiers(self.0 | flags)
    }

    pub const fn without(self, flags: u16) -> Self {
        Modifiers(self.0 & !flags)
    }

    pub fn is_public(self) -> bool {
        self.contains(ACC_PUBLIC)
    }

    pub fn is_private(self) -> bool {
        self.contains(ACC_PRIVATE)
    }

    pub fn is_protected(self) -> bool {
        self.contains(ACC_PROTECTED)
    }

    /// No visibility bit set.
    pub fn is_package_private(self) -> bool {
        self.0 & VISIBILITY == 0
    }

    pub fn is_static(self) -> bool {
        self.contains(ACC_STATIC)
    }

    pub fn is_final(self) -> bool {
        self.contains(ACC_FINAL)
    }

    pub fn is_synchronized(self) -> bool {
        self.contains(ACC_SYNCHRONIZED)
    }

    pub fn is_volatile(self) -> bool {
        self.contains(ACC_VOLATILE)
    }

    pub fn is_bridge(self) -> bool {
        self.contains(ACC_BRIDGE)
    }

    pub fn is_transient(self) -> bool {
        self.contains(ACC_TRANSIENT)
    }

    pub fn is_varargs(self) -> bool {
        self.contains(ACC_VARARGS)
    }

    pub fn is_native(self) -> bool {
        self.contains(ACC_NATIVE)
    }

    pub fn is_interface(self) -> bool {
        self.contains(ACC_INTERFACE)
    }

    pub fn is_abstract(self) -> bool {
        self.contains(ACC_ABSTRACT)
    }

    pub fn is_synthetic(self) -> bool {
        self.contains(ACC_SYNTHETIC)
    }

    pub fn is_annotation(self) -> bool {
        self.contains(ACC_ANNOTATION)
    }

    pub fn is_enum(self) -> bool {
        self.contains(ACC_ENUM)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl From<u16> for Modifiers {
    fn from(bits: u16) -> Self {
        Modifiers(bits)
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Modifiers({:#06x})", self.0)
    }
}
