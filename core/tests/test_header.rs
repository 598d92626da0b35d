// Header codec: registry checks, byte layout of both versions,
// validation order, and robustness on arbitrary input.

#[cfg(test)]
mod tests {

use proptest::prelude::*;

use lrs_core::crypto::KdfParams;
use lrs_core::headers::{
    decode_header, decode_header_v1, encode_header, encode_header_v1, encode_header_v2,
    AadHashAlg, CipherSuite, Header, HeaderError, HeaderV1, HeaderV2, KdfAlgorithm,
};

fn sample_v2() -> HeaderV2 {
    let mut h = HeaderV2::new([0x11; 16], [0x22; 24], &KdfParams::new(3, 524_288, 1));
    h.tlv_len = 12;
    h
}

fn sample_v2_bytes() -> [u8; 96] {
    encode_header_v2(&sample_v2()).unwrap()
}

// ## 1. Registries

    #[test]
    fn cipher_suite_verify() {
        assert_eq!(CipherSuite::verify(1).unwrap(), CipherSuite::XChaCha20Poly1305);
        let err = CipherSuite::verify(2).unwrap_err();
        assert!(matches!(err, HeaderError::UnsupportedCipherSuite { raw: 2 }));
    }

    #[test]
    fn kdf_verify() {
        assert_eq!(KdfAlgorithm::verify(1).unwrap(), KdfAlgorithm::Argon2id);
        assert!(matches!(KdfAlgorithm::verify(0), Err(HeaderError::UnsupportedKdf { raw: 0 })));
    }

    #[test]
    fn aad_hash_id_and_length_must_agree() {
        assert_eq!(AadHashAlg::verify(0, 0).unwrap(), AadHashAlg::None);
        assert_eq!(AadHashAlg::verify(1, 32).unwrap(), AadHashAlg::Blake2b256);
        assert!(AadHashAlg::verify(1, 16).is_err());
        assert!(AadHashAlg::verify(0, 32).is_err());
        assert!(AadHashAlg::verify(7, 0).is_err());
    }

    #[test]
    fn error_messages_name_known_ids() {
        let known = HeaderError::UnsupportedCipherSuite { raw: 1 }.to_string();
        assert!(known.contains("XChaCha20Poly1305"), "{known}");
        let unknown = HeaderError::UnsupportedKdf { raw: 0x7f }.to_string();
        assert!(unknown.contains("0x7f"), "{unknown}");
        let magic = HeaderError::InvalidMagic { have: b"XYZ".to_vec() }.to_string();
        assert!(magic.contains("XYZ"), "{magic}");
    }

    #[test]
    fn io_failures_keep_their_cause() {
        use std::io;
        use lrs_core::prelude::{EnvelopeError, ErrorKind};

        let err = HeaderError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "short read"));
        assert!(matches!(&err, HeaderError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof));
        assert!(err.to_string().contains("short read"), "{err}");

        let env = EnvelopeError::from(err);
        assert_eq!(env.kind(), ErrorKind::Io);
        assert!(!env.is_format_error());
    }

// ## 2. Version 2 layout

    #[test]
    fn v2_fields_land_at_fixed_offsets() {
        let b = sample_v2_bytes();
        assert_eq!(&b[0..3], b"LRS");
        assert_eq!(b[3], 2);
        assert_eq!(b[4], 1);
        assert_eq!(b[5], 1);
        assert_eq!(&b[6..10], &[0, 0, 0, 3]);
        assert_eq!(&b[10..14], &[0, 8, 0, 0]); // 524288 KiB
        assert_eq!(&b[14..18], &[0, 0, 0, 1]);
        assert_eq!(b[18], 16);
        assert_eq!(&b[19..35], &[0x11; 16]);
        assert_eq!(b[35], 24);
        assert_eq!(&b[36..60], &[0x22; 24]);
        assert_eq!(b[60], 0);
        assert_eq!(b[61], 0);
        assert_eq!(&b[62..94], &[0u8; 32]);
        assert_eq!(&b[94..96], &[0, 12]);
    }

    #[test]
    fn v2_aad_commitment_is_encoded() {
        let mut h = sample_v2();
        h.set_aad_hash([0xAB; 32]);
        let b = encode_header_v2(&h).unwrap();
        assert_eq!(b[60], 1);
        assert_eq!(b[61], 32);
        assert_eq!(&b[62..94], &[0xAB; 32]);

        let Header::V2(decoded) = decode_header(&b).unwrap() else {
            panic!("expected a version 2 header");
        };
        assert_eq!(decoded, h);
    }

    #[test]
    fn v2_decode_matches_encode() {
        let decoded = decode_header(&sample_v2_bytes()).unwrap();
        assert_eq!(decoded, Header::V2(sample_v2()));
        assert_eq!(decoded.encoded_len(), 96);
        assert_eq!(decoded.tlv_len(), 12);
        assert!(decoded.aad_hash().is_empty());
    }

    #[test]
    fn v2_kdf_cost_converts_kib_to_bytes() {
        let cost = Header::V2(sample_v2()).kdf_cost().unwrap();
        assert_eq!(cost.memory_bytes, 524_288 * 1024);
        assert_eq!(cost.time_cost, 3);
        assert_eq!(cost.parallelism, 1);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let mut b = sample_v2_bytes().to_vec();
        b.extend_from_slice(&[0xFF; 40]);
        assert!(matches!(decode_header(&b).unwrap(), Header::V2(_)));
    }

// ## 3. Rejections, in wire order

    #[test]
    fn bad_magic_is_rejected() {
        let mut b = sample_v2_bytes();
        b[0] = b'X';
        assert!(matches!(decode_header(&b), Err(HeaderError::InvalidMagic { .. })));
    }

    #[test]
    fn too_short_for_magic_is_invalid_magic() {
        assert!(matches!(decode_header(b"LR"), Err(HeaderError::InvalidMagic { .. })));
        assert!(matches!(decode_header(&[]), Err(HeaderError::InvalidMagic { .. })));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut b = sample_v2_bytes();
        b[3] = 3;
        assert!(matches!(decode_header(&b), Err(HeaderError::UnsupportedVersion { have: 3 })));
    }

    #[test]
    fn three_byte_magic_with_version_one_is_rejected() {
        let mut b = sample_v2_bytes();
        b[3] = 1;
        assert!(matches!(decode_header(&b), Err(HeaderError::UnsupportedVersion { have: 1 })));
    }

    #[test]
    fn cipher_is_checked_before_kdf() {
        let mut b = sample_v2_bytes();
        b[4] = 9;
        b[5] = 9;
        assert!(matches!(decode_header(&b), Err(HeaderError::UnsupportedCipherSuite { raw: 9 })));
        b[4] = 1;
        assert!(matches!(decode_header(&b), Err(HeaderError::UnsupportedKdf { raw: 9 })));
    }

    #[test]
    fn salt_and_nonce_lengths_are_checked() {
        let mut b = sample_v2_bytes();
        b[18] = 15;
        assert!(matches!(decode_header(&b), Err(HeaderError::InvalidSaltLength { have: 15 })));

        let mut b = sample_v2_bytes();
        b[35] = 12;
        assert!(matches!(decode_header(&b), Err(HeaderError::InvalidNonceLength { have: 12 })));
    }

    #[test]
    fn inconsistent_aad_descriptor_is_rejected() {
        let mut b = sample_v2_bytes();
        b[60] = 1; // BLAKE2b-256 declared with length 0
        assert!(matches!(decode_header(&b), Err(HeaderError::InvalidAadHash { id: 1, len: 0 })));
    }

    #[test]
    fn truncated_v2_header() {
        let b = sample_v2_bytes();
        let err = decode_header(&b[..50]).unwrap_err();
        assert!(matches!(err, HeaderError::BufferTooShort { have: 50, need: 96 }));
    }

// ## 4. Legacy layout

    #[test]
    fn v1_layout_and_round_trip() {
        let mut h = HeaderV1::new([0x33; 16], [0x44; 24]);
        h.aad_hash = [0x55; 16];
        let b = encode_header_v1(&h).unwrap();

        assert_eq!(b.len(), 67);
        assert_eq!(&b[0..4], b"LRS1");
        assert_eq!(b[4], 1);
        assert_eq!(b[5], 28);
        assert_eq!(b[6], 3);
        assert_eq!(b[7], 1);
        assert_eq!(&b[8..11], &[0, 0, 0]);
        assert_eq!(&b[11..27], &[0x33; 16]);
        assert_eq!(&b[27..51], &[0x44; 24]);
        assert_eq!(&b[51..67], &[0x55; 16]);

        let decoded = decode_header(&b).unwrap();
        assert_eq!(decoded, Header::V1(h.clone()));
        assert_eq!(decoded.version(), 1);
        assert_eq!(decoded.tlv_len(), 0);
        assert_eq!(decoded.salt(), &[0x33; 16]);
        assert_eq!(decoded.nonce(), &[0x44; 24]);
        assert_eq!(decode_header_v1(&b).unwrap(), h);
    }

    #[test]
    fn v1_with_wrong_version_byte() {
        let mut b = encode_header_v1(&HeaderV1::new([1; 16], [2; 24])).unwrap();
        b[4] = 2;
        assert!(matches!(decode_header(&b), Err(HeaderError::UnsupportedVersion { have: 2 })));
    }

    #[test]
    fn v1_memory_exponent_range() {
        let mut h = HeaderV1::new([1; 16], [2; 24]);
        h.kdf_mem_log2 = 16;
        assert_eq!(h.memory_bytes(), Some(65_536));
        assert_eq!(Header::V1(h.clone()).kdf_cost().unwrap().memory_bytes, 65_536);

        h.kdf_mem_log2 = 9;
        assert_eq!(h.memory_bytes(), None);
        h.kdf_mem_log2 = 41;
        assert!(Header::V1(h).kdf_cost().is_none());
    }

    #[test]
    fn encode_header_dispatches_on_layout() {
        assert_eq!(encode_header(&Header::V2(sample_v2())).unwrap().len(), 96);
        let v1 = Header::V1(HeaderV1::new([1; 16], [2; 24]));
        assert_eq!(encode_header(&v1).unwrap().len(), 67);
    }

// ## 5. Robustness

    proptest! {
        #[test]
        fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..160)) {
            let _ = decode_header(&bytes);
        }

        #[test]
        fn decode_never_panics_after_valid_prefix(
            tail in proptest::collection::vec(any::<u8>(), 0..120),
            v1 in any::<bool>(),
        ) {
            let mut bytes = if v1 { b"LRS1".to_vec() } else { b"LRS\x02".to_vec() };
            bytes.extend_from_slice(&tail);
            let _ = decode_header(&bytes);
        }
    }
}
