use bigfact::fact::{self, Limits};

fn main() {
    let limits = Limits::new(20_000);
    afl::fuzz(true, |data| {
        if let Ok(input) = std::str::from_utf8(data) {
            if let Ok(digits) = fact::compute_factorial_str_with(input, &limits) {
                assert!(digits.bytes().all(|b| b.is_ascii_digit()));
            }
        }
    });
}
