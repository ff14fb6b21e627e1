//! Shaping of the cipher suites offered in the outer TLS ClientHello.
//!
//! The offered list mimics a popular client, so it must look unmodified to a
//! censor. At the same time the negotiated suite has to be one we can
//! actually handle. [`force_supported_ciphers_first`] moves the supported
//! suites towards the front without otherwise reordering the list.

use log::trace;
use rustls::CipherSuite;

/// The suites we can actually handle (this is not the list of offered
/// suites!). Essentially all working AES-128-GCM suites.
pub const SUPPORTED_CIPHERS: [CipherSuite; 3] = [
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_RSA_WITH_AES_128_GCM_SHA256,
];

/// The suite that is always part of the offered list.
pub const ALWAYS_SUGGESTED: CipherSuite = CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256;

/// Check if we can handle `suite`.
pub fn is_supported(suite: CipherSuite) -> bool {
    SUPPORTED_CIPHERS.contains(&suite)
}

/// Reorder `suites` so that the supported ones come first, and make sure that
/// [`ALWAYS_SUGGESTED`] is offered.
///
/// This runs in two passes:
///
/// 1. Walk the list and swap every supported suite into the next free slot at
///    the front. The front segment keeps the order in which the supported
///    suites were found, not the order of [`SUPPORTED_CIPHERS`].
/// 2. If [`ALWAYS_SUGGESTED`] is anywhere in the result, return it as is.
///    Otherwise, return [`ALWAYS_SUGGESTED`] followed by the suites that come
///    after the front segment built in pass 1.
///
/// Note that in the second case the front segment is not part of the
/// returned list.
pub fn force_supported_ciphers_first(suites: &[CipherSuite]) -> Vec<CipherSuite> {
    let mut suites = suites.to_vec();

    let mut last_supported = 0;
    for i in 0..suites.len() {
        for supported in SUPPORTED_CIPHERS {
            if suites[i] == supported {
                suites.swap(i, last_supported);
                last_supported += 1;
            }
        }
    }

    if suites.contains(&ALWAYS_SUGGESTED) {
        trace!("cipher suites: {last_supported} supported moved first in {suites:?}");
        return suites;
    }

    let mut forced = Vec::with_capacity(suites.len() - last_supported + 1);
    forced.push(ALWAYS_SUGGESTED);
    forced.extend_from_slice(&suites[last_supported..]);
    trace!("cipher suites: prepended {ALWAYS_SUGGESTED:?} in {forced:?}");
    forced
}

/// [`force_supported_ciphers_first`] on raw IANA suite identifiers, as
/// embedded in a ClientHello.
pub fn force_supported_ciphers_first_u16(suites: &[u16]) -> Vec<u16> {
    let suites: Vec<CipherSuite> = suites.iter().copied().map(CipherSuite::from).collect();
    force_supported_ciphers_first(&suites)
        .into_iter()
        .map(u16::from)
        .collect()
}
