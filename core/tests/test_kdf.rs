#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use lrs_core::crypto::{
        aad_commitment_v1, aad_commitment_v2, derive_key, derive_raw_key, generate_salt_and_nonce,
        AeadCipher, Argon2idKdf, Blake2bHash, CryptoError, Hash, KdfCost, KdfParams, KeyMaterial,
        KeyMode, OsRandom, PasswordKdf, SecureRandom, XChaCha20Poly1305Cipher,
    };

    const WORDS: [u32; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    fn cheap() -> KdfCost {
        KdfParams::new(1, 64, 1).cost()
    }

    struct ZeroRandom;

    impl SecureRandom for ZeroRandom {
        fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
            dest.fill(0);
            Ok(())
        }
    }

    // ## Password KDF

    #[test]
    fn argon2id_is_deterministic() {
        let k1 = Argon2idKdf.derive(b"correct horse", &[7; 16], &cheap()).unwrap();
        let k2 = Argon2idKdf.derive(b"correct horse", &[7; 16], &cheap()).unwrap();
        assert_eq!(*k1, *k2);
    }

    #[test]
    fn argon2id_depends_on_salt_and_password() {
        let base = Argon2idKdf.derive(b"correct horse", &[7; 16], &cheap()).unwrap();
        let salt = Argon2idKdf.derive(b"correct horse", &[8; 16], &cheap()).unwrap();
        let pwd = Argon2idKdf.derive(b"wrong horse", &[7; 16], &cheap()).unwrap();
        assert_ne!(*base, *salt);
        assert_ne!(*base, *pwd);
    }

    #[test]
    fn argon2id_rejects_memory_below_minimum() {
        let cost = KdfParams::new(1, 4, 1).cost();
        let err = Argon2idKdf.derive(b"pw", &[1; 16], &cost).unwrap_err();
        assert!(matches!(err, CryptoError::KeyDerivation(_)));
    }

    #[test]
    fn zero_costs_fail_validation() {
        assert!(KdfParams::new(0, 64, 1).validate().is_err());
        assert!(KdfParams::new(1, 0, 1).validate().is_err());
        assert!(KdfParams::new(1, 64, 0).validate().is_err());
        assert!(KdfParams::default().validate().is_ok());
        assert!(KdfParams::interactive().validate().is_ok());
    }

    #[test]
    fn cost_limit_checks_every_component() {
        let limit = KdfParams::new(2, 128, 2);
        assert!(KdfParams::new(2, 128, 2).cost().fits_within(&limit));
        assert!(!KdfParams::new(3, 128, 2).cost().fits_within(&limit));
        assert!(!KdfParams::new(2, 129, 2).cost().fits_within(&limit));
        assert!(!KdfParams::new(2, 128, 3).cost().fits_within(&limit));
        assert!(KdfParams::default().cost().fits_within(&KdfParams::decrypt_limit()));
    }

    // ## Raw key

    #[test]
    fn raw_key_matches_keyed_blake2b() {
        let key = derive_raw_key(&Blake2bHash, &WORDS).unwrap();
        let expected = hex_to_32("6edf4478659fe32ab1009d7181e87dd6d6b2ccc93fbf7e2e8575560f1df31cdd");
        assert_eq!(*key, expected);
    }

    #[test]
    fn raw_key_words_are_big_endian() {
        let mut bytes = [0u8; 32];
        for (i, w) in WORDS.iter().enumerate() {
            bytes[i * 4..i * 4 + 4].copy_from_slice(&w.to_be_bytes());
        }
        let from_bytes = KeyMaterial::raw_key_from_bytes(&bytes);
        let KeyMaterial::RawKey(words) = &from_bytes else {
            panic!("expected raw key material");
        };
        assert_eq!(words, &WORDS);

        let mut direct = [0u8; 32];
        Blake2bHash.keyed_digest(b"LRS-AEAD-KEY", &bytes, &mut direct).unwrap();
        assert_eq!(*derive_raw_key(&Blake2bHash, &WORDS).unwrap(), direct);
    }

    #[test]
    fn raw_key_ignores_salt_and_cost() {
        let material = KeyMaterial::raw_key(WORDS);
        let a = derive_key(&Argon2idKdf, &Blake2bHash, KeyMode::RawKey, &material, &[1; 16], &cheap()).unwrap();
        let b = derive_key(&Argon2idKdf, &Blake2bHash, KeyMode::RawKey, &material, &[2; 16], &KdfParams::default().cost()).unwrap();
        assert_eq!(*a, *b);
    }

    #[test]
    fn material_must_match_mode() {
        let raw = KeyMaterial::raw_key(WORDS);
        let err = derive_key(&Argon2idKdf, &Blake2bHash, KeyMode::Password, &raw, &[1; 16], &cheap()).unwrap_err();
        assert!(matches!(err, CryptoError::KeyMaterialMismatch { mode: KeyMode::Password }));

        let pwd = KeyMaterial::password("pw");
        let err = derive_key(&Argon2idKdf, &Blake2bHash, KeyMode::RawKey, &pwd, &[1; 16], &cheap()).unwrap_err();
        assert!(matches!(err, CryptoError::KeyMaterialMismatch { mode: KeyMode::RawKey }));
    }

    #[test]
    fn key_mode_wire_values() {
        assert_eq!(KeyMode::from_wire(0).unwrap(), KeyMode::Password);
        assert_eq!(KeyMode::from_wire(1).unwrap(), KeyMode::RawKey);
        assert!(matches!(KeyMode::from_wire(2), Err(CryptoError::InvalidKeyMode { raw: 2 })));
        assert_eq!(KeyMode::RawKey.as_wire(), 1);
    }

    #[test]
    fn key_material_debug_is_redacted() {
        let pwd = format!("{:?}", KeyMaterial::password("correct horse"));
        assert!(!pwd.contains("correct"), "{pwd}");
        let raw = format!("{:?}", KeyMaterial::raw_key([0xDEAD_BEEF; 8]));
        assert!(!raw.to_lowercase().contains("deadbeef"), "{raw}");
        assert!(!raw.contains("3735928559"), "{raw}");
    }

    // ## AAD commitments

    #[test]
    fn aad_commitments() {
        let aad = b"project/secret.txt";
        let v2 = aad_commitment_v2(&Blake2bHash, aad).unwrap().unwrap();
        assert_eq!(v2, hex_to_32("d30429c022da439515f738e1c0c4127bec326ef9400cf4ecd98f20fa4cf35893"));

        let v1 = aad_commitment_v1(&Blake2bHash, aad).unwrap();
        assert_eq!(hex::encode(v1), "b8a1ec5602296c3962fa2a574a1bd375");

        assert_eq!(aad_commitment_v2(&Blake2bHash, b"").unwrap(), None);
        assert_eq!(aad_commitment_v1(&Blake2bHash, b"").unwrap(), [0u8; 16]);
    }

    // ## Randomness

    #[test]
    fn salt_and_nonce_are_fresh() {
        let (s1, n1) = generate_salt_and_nonce(&OsRandom).unwrap();
        let (s2, n2) = generate_salt_and_nonce(&OsRandom).unwrap();
        assert_ne!(s1, s2);
        assert_ne!(n1, n2);
    }

    #[test]
    fn all_zero_random_source_is_rejected() {
        let err = generate_salt_and_nonce(&ZeroRandom).unwrap_err();
        assert!(matches!(err, CryptoError::Random(_)));
    }

    // ## AEAD

    #[test]
    fn aead_round_trip_and_tag() {
        let key = [3u8; 32];
        let nonce = [4u8; 24];
        let ct = XChaCha20Poly1305Cipher.seal(&key, &nonce, b"aad", b"hello").unwrap();
        assert_eq!(ct.len(), 5 + 16);
        let pt = XChaCha20Poly1305Cipher.open(&key, &nonce, b"aad", &ct).unwrap();
        assert_eq!(pt, b"hello");
    }

    #[test]
    fn aead_rejects_tampering_and_short_input() {
        let key = [3u8; 32];
        let nonce = [4u8; 24];
        let mut ct = XChaCha20Poly1305Cipher.seal(&key, &nonce, b"aad", b"hello").unwrap();

        let wrong_aad = XChaCha20Poly1305Cipher.open(&key, &nonce, b"aae", &ct);
        assert!(matches!(wrong_aad, Err(CryptoError::AuthenticationFailed)));

        ct[0] ^= 1;
        let flipped = XChaCha20Poly1305Cipher.open(&key, &nonce, b"aad", &ct);
        assert!(matches!(flipped, Err(CryptoError::AuthenticationFailed)));

        let short = XChaCha20Poly1305Cipher.open(&key, &nonce, b"aad", &ct[..10]);
        assert!(matches!(short, Err(CryptoError::AuthenticationFailed)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn distinct_raw_keys_derive_distinct_keys(a in any::<[u32; 8]>(), b in any::<[u32; 8]>()) {
            prop_assume!(a != b);
            let ka = derive_raw_key(&Blake2bHash, &a).unwrap();
            let kb = derive_raw_key(&Blake2bHash, &b).unwrap();
            prop_assert_ne!(*ka, *kb);
        }
    }

    fn hex_to_32(s: &str) -> [u8; 32] {
        let v = hex::decode(s).unwrap();
        let mut out = [0u8; 32];
        out.copy_from_slice(&v);
        out
    }
}
