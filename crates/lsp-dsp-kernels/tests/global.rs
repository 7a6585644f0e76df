// SPDX-License-Identifier: LGPL-3.0-or-later
//
// Process-wide binding. Kept in its own test binary with a single test so
// nothing else touches the global registry.

use lsp_dsp_kernels::{
    detect_capabilities, dsp, init, init_with, is_initialized, registry, CpuInfo, DispatchError,
    Registry,
};

#[test]
fn init_binds_once() {
    assert!(!is_initialized());

    let bound = init().expect("first init binds");
    assert!(is_initialized());
    assert!(std::ptr::eq(bound, registry()));

    // Later attempts fail and leave the bindings alone.
    assert_eq!(init().unwrap_err(), DispatchError::AlreadyInitialized);
    assert_eq!(
        init_with(CpuInfo::generic()).unwrap_err(),
        DispatchError::AlreadyInitialized
    );
    assert!(std::ptr::eq(bound, registry()));

    let env_masked = ["LSP_DSP_DISABLE", "LSP_DSP_FORCE_GENERIC"]
        .iter()
        .any(|var| std::env::var_os(var).is_some());
    if !cfg!(feature = "force-generic") && !env_masked {
        assert_eq!(*bound, Registry::new(&detect_capabilities()).unwrap());
    }

    let mut buf = [1.0f32, 2.0, 3.0, 4.0, 5.0];
    dsp::reverse1(&mut buf);
    assert_eq!(buf, [5.0, 4.0, 3.0, 2.0, 1.0]);

    let (l, r) = ([1.0f32, 0.5, -1.0], [1.0f32, -0.5, 1.0]);
    let (mut m, mut s) = ([0.0f32; 3], [0.0f32; 3]);
    dsp::lr_to_ms(&mut m, &mut s, &l, &r);
    assert_eq!(m, [1.0, 0.0, 0.0]);
    assert_eq!(s, [0.0, 0.5, -1.0]);

    let mut dst = [4.0f32, 9.0, -1.0];
    dsp::ssqrt1(&mut dst);
    assert_eq!(dst, [2.0, 3.0, 0.0]);
}
