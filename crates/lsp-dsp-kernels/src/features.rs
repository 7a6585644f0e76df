// SPDX-License-Identifier: LGPL-3.0-or-later
// Ported from lsp-plugins/lsp-dsp-lib (C++) — x86/features.h

//! CPU capability model.
//!
//! A [`CpuInfo`] is the immutable snapshot produced once by
//! [`detect_capabilities`](crate::detect::detect_capabilities). It carries the
//! instruction-set extensions as a [`Features`] bitmask plus the vendor,
//! family and model used to decide whether an extension is actually fast on
//! the running silicon.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not, Sub};

use crate::error::ConfigError;

/// Set of instruction-set extensions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Features(u32);

impl Features {
    /// The empty set. Every reference kernel requires exactly this.
    pub const NONE: Self = Self(0);

    pub const SSE: Self = Self(1 << 0);
    pub const SSE2: Self = Self(1 << 1);
    pub const SSE3: Self = Self(1 << 2);
    pub const SSSE3: Self = Self(1 << 3);
    pub const SSE4_1: Self = Self(1 << 4);
    pub const SSE4_2: Self = Self(1 << 5);
    pub const FMA3: Self = Self(1 << 6);
    pub const AVX: Self = Self(1 << 7);
    pub const AVX2: Self = Self(1 << 8);
    pub const AVX512F: Self = Self(1 << 9);
    pub const AVX512DQ: Self = Self(1 << 10);
    pub const AVX512BW: Self = Self(1 << 11);
    pub const AVX512VL: Self = Self(1 << 12);
    pub const NEON: Self = Self(1 << 13);

    /// The silicon executes 256-bit AVX at full width.
    pub const FAST_AVX: Self = Self(1 << 24);
    /// The silicon executes FMA3 without a latency penalty.
    pub const FAST_FMA3: Self = Self(1 << 25);

    /// Bits derived from vendor identification rather than from the ISA.
    pub const VENDOR_HINTS: Self = Self(Self::FAST_AVX.0 | Self::FAST_FMA3.0);

    const NAMES: [(Self, &'static str); 16] = [
        (Self::SSE, "sse"),
        (Self::SSE2, "sse2"),
        (Self::SSE3, "sse3"),
        (Self::SSSE3, "ssse3"),
        (Self::SSE4_1, "sse4.1"),
        (Self::SSE4_2, "sse4.2"),
        (Self::FMA3, "fma3"),
        (Self::AVX, "avx"),
        (Self::AVX2, "avx2"),
        (Self::AVX512F, "avx512f"),
        (Self::AVX512DQ, "avx512dq"),
        (Self::AVX512BW, "avx512bw"),
        (Self::AVX512VL, "avx512vl"),
        (Self::NEON, "neon"),
        (Self::FAST_AVX, "fast-avx"),
        (Self::FAST_FMA3, "fast-fma3"),
    ];

    /// Raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build a set from raw bits. Unknown bits are dropped.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        let mut all = 0;
        let mut i = 0;
        while i < Self::NAMES.len() {
            all |= Self::NAMES[i].0.0;
            i += 1;
        }
        Self(bits & all)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if every bit of `other` is present in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// The set without the vendor hint bits.
    pub const fn isa(self) -> Self {
        Self(self.0 & !Self::VENDOR_HINTS.0)
    }

    /// Look up a single feature by its lower-case name (`"avx"`, `"sse4.1"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(f, _)| *f)
    }

    /// Parse a comma-separated list of feature names.
    pub fn parse_list(list: &str) -> Result<Self, ConfigError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .try_fold(Self::NONE, |acc, name| {
                Self::from_name(name)
                    .map(|f| acc | f)
                    .ok_or_else(|| ConfigError::UnknownFeature(name.to_string()))
            })
    }

    /// Names of the features present in this set, in bit order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .iter()
            .filter(move |(f, _)| self.contains(*f))
            .map(|(_, n)| *n)
    }
}

impl BitOr for Features {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Features {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Features {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Sub for Features {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl Not for Features {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_bits_truncate(!self.0)
    }
}

impl fmt::Debug for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// CPU vendor as reported by the identification string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Vendor {
    #[default]
    Unknown,
    Amd,
    Hygon,
    Intel,
    Nsc,
    Transmeta,
    Via,
}

impl Vendor {
    /// First AMD family with full-width AVX and fast FMA3 (Zen).
    pub const AMD_FAMILY_ZEN: u32 = 0x17;

    /// Classify a CPUID vendor identification string.
    pub fn from_id(id: &str) -> Self {
        match id {
            "AuthenticAMD" | "AMDisbetter!" => Self::Amd,
            "HygonGenuine" => Self::Hygon,
            "GenuineIntel" => Self::Intel,
            "Geode by NSC" => Self::Nsc,
            "GenuineTMx86" | "TransmetaCPU" => Self::Transmeta,
            "CentaurHauls" | "VIA VIA VIA " => Self::Via,
            _ => Self::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Amd => "AMD",
            Self::Hygon => "Hygon",
            Self::Intel => "Intel",
            Self::Nsc => "NSC",
            Self::Transmeta => "Transmeta",
            Self::Via => "VIA",
        }
    }
}

/// Immutable capability record, created once per process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CpuInfo {
    pub vendor: Vendor,
    pub family: u32,
    pub model: u32,
    pub features: Features,
    pub brand: String,
}

impl CpuInfo {
    /// A record with no extensions at all. Binding it selects every reference kernel.
    pub fn generic() -> Self {
        Self::default()
    }

    /// A synthetic record carrying exactly `features`, for forcing code paths.
    pub fn with_features(features: Features) -> Self {
        Self {
            features,
            ..Self::default()
        }
    }

    /// Instruction-set extensions only, vendor hints stripped.
    pub fn isa(&self) -> Features {
        self.features.isa()
    }

    /// Vendor hint bits implied by vendor and family.
    ///
    /// Unknown vendors get no hints; correctness never depends on them.
    pub fn vendor_hints(vendor: Vendor, family: u32) -> Features {
        match vendor {
            Vendor::Intel => Features::FAST_AVX | Features::FAST_FMA3,
            Vendor::Amd | Vendor::Hygon if family >= Vendor::AMD_FAMILY_ZEN => {
                Features::FAST_AVX | Features::FAST_FMA3
            }
            _ => Features::NONE,
        }
    }
}

impl fmt::Display for CpuInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vendor={} family=0x{:x} model=0x{:x}",
            self.vendor.name(),
            self.family,
            self.model
        )?;
        if !self.brand.is_empty() {
            write!(f, " brand=\"{}\"", self.brand)?;
        }
        write!(f, " features=[{}]", self.features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_and_isa() {
        let f = Features::AVX | Features::FMA3 | Features::FAST_AVX;
        assert!(f.contains(Features::AVX));
        assert!(f.contains(Features::AVX | Features::FMA3));
        assert!(!f.contains(Features::AVX2));
        assert!(f.contains(Features::NONE));
        assert_eq!(f.isa(), Features::AVX | Features::FMA3);
        assert_eq!(f - Features::FMA3, Features::AVX | Features::FAST_AVX);
    }

    #[test]
    fn test_parse_list() {
        let f = Features::parse_list("avx, fma3,sse4.1").unwrap();
        assert_eq!(f, Features::AVX | Features::FMA3 | Features::SSE4_1);
        assert_eq!(Features::parse_list("").unwrap(), Features::NONE);
        assert!(matches!(
            Features::parse_list("avx,mmx"),
            Err(ConfigError::UnknownFeature(name)) if name == "mmx"
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Features::NONE.to_string(), "none");
        assert_eq!((Features::SSE | Features::AVX).to_string(), "sse avx");
    }

    #[test]
    fn test_not_drops_unknown_bits() {
        let all = !Features::NONE;
        assert!(all.contains(Features::NEON | Features::FAST_FMA3));
        assert_eq!(all.bits() & (1 << 20), 0);
    }

    #[test]
    fn test_vendor_classification() {
        assert_eq!(Vendor::from_id("GenuineIntel"), Vendor::Intel);
        assert_eq!(Vendor::from_id("AuthenticAMD"), Vendor::Amd);
        assert_eq!(Vendor::from_id("HygonGenuine"), Vendor::Hygon);
        assert_eq!(Vendor::from_id("CentaurHauls"), Vendor::Via);
        assert_eq!(Vendor::from_id("SomethingElse"), Vendor::Unknown);
    }

    #[test]
    fn test_vendor_hints() {
        let fast = Features::FAST_AVX | Features::FAST_FMA3;
        assert_eq!(CpuInfo::vendor_hints(Vendor::Intel, 6), fast);
        assert_eq!(CpuInfo::vendor_hints(Vendor::Amd, 0x19), fast);
        assert_eq!(CpuInfo::vendor_hints(Vendor::Amd, 0x15), Features::NONE);
        assert_eq!(CpuInfo::vendor_hints(Vendor::Hygon, 0x18), fast);
        assert_eq!(CpuInfo::vendor_hints(Vendor::Unknown, 0x30), Features::NONE);
    }
}
