// SPDX-License-Identifier: LGPL-3.0-or-later

//! Variant catalogue and dispatch registry.
//!
//! The [`Catalogue`] lists, per primitive, every compiled variant with its
//! requirements and priority rank. A [`Registry`] is the immutable lookup
//! table produced by binding the catalogue against one [`CpuInfo`]: for every
//! primitive it holds the highest-ranked variant whose requirements are met,
//! declaration order breaking ties. The reference kernel requires nothing, so
//! binding never leaves a primitive without an implementation.
//!
//! Hosts either keep a [`Registry`] and call through it, or bind the
//! process-wide table once with [`init`] and use the free functions in
//! [`dsp`].

use std::cmp::Reverse;
use std::fmt;

use once_cell::sync::{Lazy, OnceCell};

use crate::bitmap::{Bitmap1, Bitmap8};
use crate::config::DispatchConfig;
use crate::detect::detect_capabilities;
use crate::error::DispatchError;
use crate::features::{CpuInfo, Features};
use crate::generic;

pub type UnaryFn = fn(&mut [f32]);
pub type CopyFn = fn(&mut [f32], &[f32]);
pub type Conv2x1Fn = fn(&mut [f32], &[f32], &[f32]);
pub type Conv2Fn = fn(&mut [f32], &mut [f32], &[f32], &[f32]);
pub type FmopK3Fn = fn(&mut [f32], &[f32], f32);
pub type FmopK4Fn = fn(&mut [f32], &[f32], &[f32], f32);
pub type BitmapFn = fn(&mut Bitmap8<'_>, &Bitmap1<'_>, isize, isize);

/// One implementation of a primitive.
pub struct Variant<F> {
    name: &'static str,
    requires: Features,
    rank: u32,
    entry: F,
}

impl<F: Copy> Variant<F> {
    pub(crate) const fn new(name: &'static str, requires: Features, rank: u32, entry: F) -> Self {
        Self {
            name,
            requires,
            rank,
            entry,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Features the running CPU must have for this variant to be bound.
    pub fn requires(&self) -> Features {
        self.requires
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn info(&self) -> VariantInfo {
        VariantInfo {
            name: self.name,
            requires: self.requires,
            rank: self.rank,
        }
    }

    /// The entry point, provided the instruction sets it needs are present
    /// both in `features` and on the running CPU.
    ///
    /// Vendor hint bits are ignored: they only steer selection, so a variant
    /// that is merely slow on this CPU is still returned.
    pub fn checked_entry(&self, features: Features) -> Option<F> {
        (features.isa() & host_isa())
            .contains(self.requires.isa())
            .then_some(self.entry)
    }

    /// The entry point without any check.
    ///
    /// # Safety
    ///
    /// Calling the returned function on a CPU lacking [`Self::requires`]
    /// executes unsupported instructions.
    pub unsafe fn entry(&self) -> F {
        self.entry
    }
}

impl<F> fmt::Debug for Variant<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .field("rank", &self.rank)
            .finish_non_exhaustive()
    }
}

/// Descriptor of a bound or registered variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantInfo {
    pub name: &'static str,
    pub requires: Features,
    pub rank: u32,
}

impl fmt::Display for VariantInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (rank {}, requires {})", self.name, self.rank, self.requires)
    }
}

/// Highest rank wins; among equal ranks the earliest declared.
fn select<F: Copy>(
    variants: &'static [Variant<F>],
    features: Features,
    primitive: &'static str,
) -> Result<&'static Variant<F>, DispatchError> {
    variants
        .iter()
        .enumerate()
        .filter(|(_, v)| features.contains(v.requires))
        .max_by_key(|&(i, v)| (v.rank, Reverse(i)))
        .map(|(_, v)| v)
        .ok_or(DispatchError::NoVariant { primitive })
}

static CATALOGUE: Lazy<Catalogue> = Lazy::new(Catalogue::build);

static HOST_ISA: Lazy<Features> = Lazy::new(|| detect_capabilities().isa());

/// Instruction sets of the running CPU. No entry requiring more is ever
/// handed out by a safe API.
fn host_isa() -> Features {
    *HOST_ISA
}

/// The catalogue of every variant compiled into this build.
pub fn catalogue() -> &'static Catalogue {
    &CATALOGUE
}

macro_rules! primitives {
    ($(
        $(#[$doc:meta])*
        $variant:ident => $name:ident($($arg:ident: $ty:ty),*) as $fn_ty:ident;
    )*) => {
        /// Identifier of an exported primitive.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Primitive {
            $($variant,)*
        }

        impl Primitive {
            /// Every primitive, in catalogue order.
            pub const ALL: &'static [Primitive] = &[$(Primitive::$variant,)*];

            /// The stable exported name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($name),)*
                }
            }
        }

        impl fmt::Display for Primitive {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        /// Variant lists, reference kernel first.
        pub struct Catalogue {
            $(pub(crate) $name: Vec<Variant<$fn_ty>>,)*
        }

        impl Catalogue {
            fn reference() -> Self {
                Self {
                    $($name: vec![Variant::new("generic", Features::NONE, 0, generic::$name as $fn_ty)],)*
                }
            }

            $(
                pub fn $name(&self) -> &[Variant<$fn_ty>] {
                    &self.$name
                }
            )*

            /// Descriptors of every variant of `primitive`.
            pub fn variants(&self, primitive: Primitive) -> Vec<VariantInfo> {
                match primitive {
                    $(Primitive::$variant => self.$name.iter().map(Variant::info).collect(),)*
                }
            }
        }

        /// Immutable primitive → variant bindings.
        #[derive(Clone, Copy)]
        pub struct Registry {
            $($name: &'static Variant<$fn_ty>,)*
        }

        impl Registry {
            fn bind(features: Features) -> Result<Self, DispatchError> {
                let cat = catalogue();
                let registry = Self {
                    $($name: select(&cat.$name, features, stringify!($name))?,)*
                };
                for (primitive, info) in registry.bindings() {
                    log::debug!("{primitive} -> {}", info.name);
                }
                Ok(registry)
            }

            /// Every primitive bound to its reference kernel.
            pub fn reference() -> Self {
                let cat = catalogue();
                Self {
                    $($name: &cat.$name[0],)*
                }
            }

            /// The variant bound to `primitive`.
            pub fn binding(&self, primitive: Primitive) -> VariantInfo {
                match primitive {
                    $(Primitive::$variant => self.$name.info(),)*
                }
            }

            $(
                $(#[$doc])*
                #[inline]
                pub fn $name(&self, $($arg: $ty),*) {
                    (self.$name.entry)($($arg),*)
                }
            )*
        }

        impl PartialEq for Registry {
            fn eq(&self, other: &Self) -> bool {
                true $(&& std::ptr::eq(self.$name, other.$name))*
            }
        }

        impl Eq for Registry {}

        /// Name-stable call surface over the process-wide registry.
        ///
        /// [`init`](super::init) must have run first.
        pub mod dsp {
            use super::*;

            $(
                $(#[$doc])*
                #[inline]
                pub fn $name($($arg: $ty),*) {
                    registry().$name($($arg),*)
                }
            )*
        }
    };
}

primitives! {
    /// Reverse `dst` in place.
    Reverse1 => reverse1(dst: &mut [f32]) as UnaryFn;
    /// Copy `src` into `dst` reversed. Panics if `dst` is shorter than `src`.
    Reverse2 => reverse2(dst: &mut [f32], src: &[f32]) as CopyFn;

    /// Left/Right to Mid/Side.
    LrToMs => lr_to_ms(m: &mut [f32], s: &mut [f32], l: &[f32], r: &[f32]) as Conv2Fn;
    /// `m = (l + r) * 0.5`
    LrToMid => lr_to_mid(m: &mut [f32], l: &[f32], r: &[f32]) as Conv2x1Fn;
    /// `s = (l - r) * 0.5`
    LrToSide => lr_to_side(s: &mut [f32], l: &[f32], r: &[f32]) as Conv2x1Fn;
    /// Mid/Side to Left/Right.
    MsToLr => ms_to_lr(l: &mut [f32], r: &mut [f32], m: &[f32], s: &[f32]) as Conv2Fn;
    /// `l = m + s`
    MsToLeft => ms_to_left(l: &mut [f32], m: &[f32], s: &[f32]) as Conv2x1Fn;
    /// `r = m - s`
    MsToRight => ms_to_right(r: &mut [f32], m: &[f32], s: &[f32]) as Conv2x1Fn;

    /// `dst = dst + src * k`
    FmaddK3 => fmadd_k3(dst: &mut [f32], src: &[f32], k: f32) as FmopK3Fn;
    /// `dst = dst - src * k`
    FmsubK3 => fmsub_k3(dst: &mut [f32], src: &[f32], k: f32) as FmopK3Fn;
    /// `dst = src * k - dst`
    FmrsubK3 => fmrsub_k3(dst: &mut [f32], src: &[f32], k: f32) as FmopK3Fn;
    /// `dst = dst * src * k`
    FmmulK3 => fmmul_k3(dst: &mut [f32], src: &[f32], k: f32) as FmopK3Fn;
    /// `dst = dst / (src * k)`
    FmdivK3 => fmdiv_k3(dst: &mut [f32], src: &[f32], k: f32) as FmopK3Fn;
    /// `dst = (src * k) / dst`
    FmrdivK3 => fmrdiv_k3(dst: &mut [f32], src: &[f32], k: f32) as FmopK3Fn;
    /// `dst = dst mod (src * k)`
    FmmodK3 => fmmod_k3(dst: &mut [f32], src: &[f32], k: f32) as FmopK3Fn;
    /// `dst = (src * k) mod dst`
    FmrmodK3 => fmrmod_k3(dst: &mut [f32], src: &[f32], k: f32) as FmopK3Fn;

    /// `dst = src1 + src2 * k`
    FmaddK4 => fmadd_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) as FmopK4Fn;
    /// `dst = src1 - src2 * k`
    FmsubK4 => fmsub_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) as FmopK4Fn;
    /// `dst = src2 * k - src1`
    FmrsubK4 => fmrsub_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) as FmopK4Fn;
    /// `dst = src1 * src2 * k`
    FmmulK4 => fmmul_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) as FmopK4Fn;
    /// `dst = src1 / (src2 * k)`
    FmdivK4 => fmdiv_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) as FmopK4Fn;
    /// `dst = (src2 * k) / src1`
    FmrdivK4 => fmrdiv_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) as FmopK4Fn;
    /// `dst = src1 mod (src2 * k)`
    FmmodK4 => fmmod_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) as FmopK4Fn;
    /// `dst = (src2 * k) mod src1`
    FmrmodK4 => fmrmod_k4(dst: &mut [f32], src1: &[f32], src2: &[f32], k: f32) as FmopK4Fn;

    /// `dst = sqrt(max(dst, 0))`
    Ssqrt1 => ssqrt1(dst: &mut [f32]) as UnaryFn;
    /// `dst = sqrt(max(src, 0))`
    Ssqrt2 => ssqrt2(dst: &mut [f32], src: &[f32]) as CopyFn;

    /// Draw a 1-bit bitmap at (`x`, `y`), set pixels `0xff`, clear `0x00`.
    BitmapPutB1b8 => bitmap_put_b1b8(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) as BitmapFn;
    /// Saturating add of a 1-bit bitmap at (`x`, `y`).
    BitmapAddB1b8 => bitmap_add_b1b8(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) as BitmapFn;
    /// Saturating subtract of a 1-bit bitmap at (`x`, `y`).
    BitmapSubB1b8 => bitmap_sub_b1b8(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) as BitmapFn;
    /// Maximum with a 1-bit bitmap at (`x`, `y`).
    BitmapMaxB1b8 => bitmap_max_b1b8(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) as BitmapFn;
    /// Minimum with a 1-bit bitmap at (`x`, `y`).
    BitmapMinB1b8 => bitmap_min_b1b8(dst: &mut Bitmap8<'_>, src: &Bitmap1<'_>, x: isize, y: isize) as BitmapFn;
}

impl Catalogue {
    fn build() -> Self {
        #[allow(unused_mut)]
        let mut cat = Self::reference();
        #[cfg(target_arch = "x86_64")]
        crate::arch::x86::register(&mut cat);
        #[cfg(target_arch = "aarch64")]
        crate::arch::aarch64::register(&mut cat);
        cat
    }
}

impl Registry {
    /// Bind every primitive against `cpu`.
    ///
    /// Instruction sets the running CPU lacks are dropped from the record
    /// first, so a forced record can steer selection down but never up. Vendor
    /// hints are taken from the record as given.
    pub fn new(cpu: &CpuInfo) -> Result<Self, DispatchError> {
        let missing = cpu.isa() - host_isa();
        if !missing.is_empty() {
            log::warn!("ignoring features this CPU lacks: {missing}");
        }
        Self::bind(cpu.features - missing)
    }

    /// Bind every primitive against `cpu` exactly as given.
    ///
    /// Useful to inspect what another CPU would bind.
    ///
    /// # Safety
    ///
    /// Calling a primitive through the result executes the instructions of
    /// every extension in `cpu`. The caller must either not call primitives
    /// or ensure the running CPU supports all of them.
    pub unsafe fn new_unchecked(cpu: &CpuInfo) -> Result<Self, DispatchError> {
        Self::bind(cpu.features)
    }

    /// `(primitive, bound variant)` for every primitive, in catalogue order.
    pub fn bindings(&self) -> impl Iterator<Item = (Primitive, VariantInfo)> + '_ {
        Primitive::ALL.iter().map(|&p| (p, self.binding(p)))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.bindings().map(|(p, v)| (p.name(), v.name)))
            .finish()
    }
}

static GLOBAL: OnceCell<Registry> = OnceCell::new();

/// Bind the process-wide registry from live detection and the environment.
pub fn init() -> Result<&'static Registry, DispatchError> {
    init_with_config(DispatchConfig::from_env())
}

/// Bind the process-wide registry against a forced capability record.
///
/// Extensions the running CPU lacks are ignored, see [`Registry::new`].
pub fn init_with(cpu: CpuInfo) -> Result<&'static Registry, DispatchError> {
    init_with_config(DispatchConfig::forced(cpu))
}

/// Bind the process-wide registry according to `config`.
///
/// Succeeds once per process; later calls return
/// [`DispatchError::AlreadyInitialized`] and leave the bindings untouched.
pub fn init_with_config(config: DispatchConfig) -> Result<&'static Registry, DispatchError> {
    let mut bound = false;
    let registry = GLOBAL.get_or_try_init(|| {
        bound = true;
        let cpu = config.resolve();
        log::info!("binding DSP kernels for {cpu}");
        Registry::new(&cpu)
    })?;
    if !bound {
        return Err(DispatchError::AlreadyInitialized);
    }
    Ok(registry)
}

/// `true` once the process-wide registry is bound.
pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

/// The process-wide registry.
///
/// Calling a primitive before [`init`] is a contract violation; debug builds
/// panic, release builds bind from live detection on first use.
pub fn registry() -> &'static Registry {
    debug_assert!(is_initialized(), "DSP primitive called before init()");
    GLOBAL.get_or_init(|| {
        let cpu = DispatchConfig::from_env().resolve();
        Registry::new(&cpu).unwrap_or_else(|_| Registry::reference())
    })
}
