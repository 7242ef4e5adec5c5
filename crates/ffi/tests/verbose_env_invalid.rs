// An unparsable FC_VERBOSE warns once and leaves diagnostics off.

mod common;

use fc::{fc, fc_verbose};

#[test]
fn invalid_env_keeps_diagnostics_off() {
    std::env::set_var("FC_VERBOSE", "loud");

    let lines = common::captured(|| {
        assert_eq!(fc_verbose(), 0);

        let mut z = [0.0; 1];
        let ret = unsafe { fc(1, [-5.5].as_ptr(), [5.5].as_ptr(), z.as_mut_ptr()) };
        assert_eq!(ret, 1);
        assert_eq!(z, [0.0]);
    });

    let warnings: Vec<_> = lines
        .iter()
        .filter(|l| l.contains("FC_VERBOSE=loud is not a boolean"))
        .collect();
    assert_eq!(warnings.len(), 1, "{lines:?}");
    assert!(lines.iter().all(|l| !l.contains("fc: N=")), "{lines:?}");
}
