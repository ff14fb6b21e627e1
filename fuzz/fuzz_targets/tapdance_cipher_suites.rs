use tapdance::{ALWAYS_SUGGESTED, force_supported_ciphers_first_u16};

fn main() {
    afl::fuzz!(|data: &[u8]| {
        let suites: Vec<u16> = data
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();

        let out = force_supported_ciphers_first_u16(&suites);
        let always = u16::from(ALWAYS_SUGGESTED);
        assert!(out.contains(&always));
        assert!(out.len() <= suites.len() + 1);

        if suites.contains(&always) {
            assert_eq!(out.len(), suites.len());
            assert_eq!(force_supported_ciphers_first_u16(&out), out);
        } else {
            assert_eq!(out[0], always);
        }
    });
}
