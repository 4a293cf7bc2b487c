//! `contiguity-signature` header verification.
//!
//! The header has the form `t=<unix seconds>,v1=<hex HMAC-SHA256>` where the MAC is
//! computed over `"{t}.{raw body}"` with the webhook secret as key. Always verify the
//! raw body exactly as received; re-serialized JSON will not match.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningError {
    #[error("webhook secret cannot be empty")]
    EmptySecret,

    #[error("webhook secret cannot be used as an HMAC key")]
    InvalidKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SignatureHeader<'a> {
    timestamp: &'a str,
    signature: &'a str,
}

fn parse_header(header: &str) -> Option<SignatureHeader<'_>> {
    let (timestamp, signature) = header.trim().split_once(',')?;
    let timestamp = timestamp.strip_prefix("t=")?;
    let signature = signature.strip_prefix("v1=")?;

    let digits = !timestamp.is_empty() && timestamp.bytes().all(|b| b.is_ascii_digit());
    let hex = !signature.is_empty()
        && signature
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    (digits && hex).then_some(SignatureHeader {
        timestamp,
        signature,
    })
}

fn compute(raw_body: &[u8], secret: &str, timestamp: &str) -> Result<String, SigningError> {
    if secret.is_empty() {
        return Err(SigningError::EmptySecret);
    }
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SigningError::InvalidKey)?;
    let signed_payload = format!("{timestamp}.{}", String::from_utf8_lossy(raw_body));
    mac.update(signed_payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Builds a header value for `raw_body` signed at `timestamp` (unix seconds).
pub fn sign(raw_body: &[u8], secret: &str, timestamp: i64) -> Result<String, SigningError> {
    let timestamp = timestamp.to_string();
    let signature = compute(raw_body, secret, &timestamp)?;
    Ok(format!("t={timestamp},v1={signature}"))
}

/// Checks a webhook signature against the current clock.
///
/// `tolerance` is the accepted clock skew in seconds; `None` skips the freshness check.
/// Returns `false` for any missing, malformed, stale, or mismatched input.
pub fn verify_signature(
    raw_body: &[u8],
    signature_header: Option<&str>,
    secret: &str,
    tolerance: Option<u64>,
) -> bool {
    verify_at(raw_body, signature_header, secret, tolerance, now_secs())
}

/// Like [`verify_signature`], with `now` (unix seconds) supplied by the caller.
pub fn verify_at(
    raw_body: &[u8],
    signature_header: Option<&str>,
    secret: &str,
    tolerance: Option<u64>,
    now: i64,
) -> bool {
    if secret.is_empty() {
        tracing::debug!("webhook signature rejected: empty secret");
        return false;
    }
    let Some(header) = signature_header else {
        tracing::debug!("webhook signature rejected: missing header");
        return false;
    };
    let Some(header) = parse_header(header) else {
        tracing::debug!("webhook signature rejected: malformed header");
        return false;
    };

    let Ok(expected) = compute(raw_body, secret, header.timestamp) else {
        return false;
    };
    if expected.len() != header.signature.len() {
        tracing::debug!("webhook signature rejected: length mismatch");
        return false;
    }
    if !bool::from(expected.as_bytes().ct_eq(header.signature.as_bytes())) {
        tracing::debug!("webhook signature rejected: mismatch");
        return false;
    }

    if let Some(tolerance) = tolerance {
        let Ok(timestamp) = header.timestamp.parse::<i64>() else {
            tracing::debug!("webhook signature rejected: timestamp out of range");
            return false;
        };
        let skew = now.abs_diff(timestamp);
        if skew > tolerance {
            tracing::debug!(skew, tolerance, "webhook signature rejected: stale timestamp");
            return false;
        }
    }

    true
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";
    const BODY: &[u8] = br#"{"id":"evt_1","type":"text.incoming.sms","timestamp":1700000000,"data":{}}"#;
    const TS: i64 = 1_700_000_000;

    fn manual_signature(body: &[u8], secret: &str, ts: i64) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{ts}.").as_bytes());
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn sign_matches_manual_hmac() {
        let header = sign(BODY, SECRET, TS).unwrap();
        assert_eq!(
            header,
            format!("t={TS},v1={}", manual_signature(BODY, SECRET, TS))
        );
    }

    #[test]
    fn valid_signature_is_accepted() {
        let header = sign(BODY, SECRET, TS).unwrap();
        assert!(verify_at(BODY, Some(&header), SECRET, None, TS));
        assert!(verify_at(BODY, Some(&header), SECRET, Some(300), TS + 300));
        assert!(verify_at(BODY, Some(&format!("  {header}\n")), SECRET, None, TS));
    }

    #[test]
    fn empty_body_can_be_signed() {
        let header = sign(b"", SECRET, TS).unwrap();
        assert!(verify_at(b"", Some(&header), SECRET, None, TS));
    }

    #[test]
    fn missing_inputs_are_rejected() {
        let header = sign(BODY, SECRET, TS).unwrap();
        assert!(!verify_at(BODY, None, SECRET, None, TS));
        assert!(!verify_at(BODY, Some(&header), "", None, TS));
        assert_eq!(sign(BODY, "", TS), Err(SigningError::EmptySecret));
    }

    #[test]
    fn tampered_body_or_wrong_secret_is_rejected() {
        let header = sign(BODY, SECRET, TS).unwrap();
        assert!(!verify_at(b"{\"id\":\"evt_2\"}", Some(&header), SECRET, None, TS));
        assert!(!verify_at(BODY, Some(&header), "whsec_other", None, TS));
    }

    #[test]
    fn malformed_headers_are_rejected() {
        let signature = manual_signature(BODY, SECRET, TS);
        for header in [
            String::new(),
            "garbage".to_owned(),
            format!("v1={signature}"),
            format!("t={TS}"),
            format!("v1={signature},t={TS}"),
            format!("t=abc,v1={signature}"),
            format!("t={TS},v1={}", signature.to_uppercase()),
            format!("t={TS},v1=zz{}", &signature[2..]),
            format!("t={TS},v1="),
        ] {
            assert!(!verify_at(BODY, Some(&header), SECRET, None, TS), "{header}");
        }
    }

    #[test]
    fn extra_header_segments_are_rejected() {
        let header = sign(BODY, SECRET, TS).unwrap();
        let signature = manual_signature(BODY, SECRET, TS);
        for extended in [
            format!("{header},v0=deadbeef"),
            format!("{header},v1={signature}"),
            format!("t={TS},v0=deadbeef,v1={signature}"),
        ] {
            assert!(!verify_at(BODY, Some(&extended), SECRET, None, TS), "{extended}");
        }
        assert!(verify_at(BODY, Some(&header), SECRET, None, TS));
    }

    #[test]
    fn truncated_signature_fails_on_length() {
        let signature = manual_signature(BODY, SECRET, TS);
        let header = format!("t={TS},v1={}", &signature[..62]);
        assert!(!verify_at(BODY, Some(&header), SECRET, None, TS));
    }

    #[test]
    fn tolerance_rejects_stale_and_future_timestamps() {
        let header = sign(BODY, SECRET, TS).unwrap();
        assert!(!verify_at(BODY, Some(&header), SECRET, Some(300), TS + 301));
        assert!(!verify_at(BODY, Some(&header), SECRET, Some(300), TS - 301));
        assert!(verify_at(BODY, Some(&header), SECRET, None, TS + 1_000_000));
    }

    #[test]
    fn oversized_timestamp_fails_only_with_tolerance() {
        let ts = "99999999999999999999";
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(format!("{ts}.").as_bytes());
        mac.update(BODY);
        let header = format!("t={ts},v1={}", hex::encode(mac.finalize().into_bytes()));

        assert!(verify_at(BODY, Some(&header), SECRET, None, TS));
        assert!(!verify_at(BODY, Some(&header), SECRET, Some(300), TS));
    }

    #[test]
    fn non_utf8_body_is_signed_lossily() {
        let body = [0xff, 0xfe, b'{', b'}'];
        let header = sign(&body, SECRET, TS).unwrap();
        assert!(verify_at(&body, Some(&header), SECRET, None, TS));
    }

    #[test]
    fn live_clock_accepts_fresh_signature() {
        let header = sign(BODY, SECRET, now_secs()).unwrap();
        assert!(verify_signature(BODY, Some(&header), SECRET, Some(60)));
    }
}
