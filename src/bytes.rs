const BIPREFIXES: [&str; 5] = ["", "Ki", "Mi", "Gi", "Ti"];

/// Renders a byte count with the largest binary prefix that keeps it >= 1,
/// rounding down.
pub fn fmt_bibytes(size: u64) -> String {
    if size == 0 {
        return "0B".into();
    }
    let idx = (BIPREFIXES.len() as u64 - 1).min(size.ilog2() as u64 / 10);
    format!("{}{}B", size >> (10 * idx), BIPREFIXES[idx as usize])
}

#[test]
fn test_fmt_bibytes() {
    macro_rules! y {
        ($r:expr,$a:expr) => {
            assert_eq!(fmt_bibytes($r), $a)
        };
    }

    y!(0, "0B");
    y!(158, "158B");
    y!(1024, "1KiB");
    y!(1 << 28, "256MiB");
    y!((1 << 30) + 1, "1GiB");
    y!(1 << 40, "1TiB");
    y!(1 << 50, "1024TiB");
}
