#[cfg(test)]
mod tests {
    use lrs_core::constants::{DEFAULT_KDF_MEMORY_KIB, DEFAULT_TLV_CAPACITY, MAX_KDF_MEMORY_KIB};
    use lrs_core::prelude::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = EnvelopeConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.tlv_capacity, DEFAULT_TLV_CAPACITY);
        assert_eq!(cfg.kdf.memory_kib, DEFAULT_KDF_MEMORY_KIB);
        assert_eq!(cfg.key_mode_policy, KeyModePolicy::AutoDetect);
        assert_eq!(cfg.max_kdf, KdfParams::decrypt_limit());
        assert_eq!(cfg.max_kdf.memory_kib, MAX_KDF_MEMORY_KIB);
    }

    #[test]
    fn kdf_cost_must_fit_max_kdf() {
        let cfg = EnvelopeConfig::new(KdfParams::new(1, 64, 1)).with_max_kdf(KdfParams::new(1, 32, 1));
        assert_eq!(cfg.validate().unwrap_err().kind(), ErrorKind::InvalidConfig);

        let cfg = EnvelopeConfig::new(KdfParams::new(17, 64, 1));
        assert_eq!(cfg.validate().unwrap_err().kind(), ErrorKind::InvalidConfig);

        let cfg = EnvelopeConfig::new(KdfParams::new(4, 64, 2)).with_max_kdf(KdfParams::new(4, 64, 2));
        cfg.validate().unwrap();
    }

    #[test]
    fn max_kdf_loads_from_json() {
        let cfg = EnvelopeConfig::from_json_str(
            r#"{ "kdf": { "time_cost": 1, "memory_kib": 64, "parallelism": 1 },
                 "max_kdf": { "time_cost": 2, "memory_kib": 128, "parallelism": 1 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.max_kdf, KdfParams::new(2, 128, 1));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = EnvelopeConfig::from_json_str(r#"{ "tlv_capacity": 32, "key_mode_policy": "strict" }"#).unwrap();
        assert_eq!(cfg.tlv_capacity, 32);
        assert_eq!(cfg.key_mode_policy, KeyModePolicy::Strict);
        assert_eq!(cfg.kdf, KdfParams::default());
    }

    #[test]
    fn json_round_trip() {
        let cfg = EnvelopeConfig::new(KdfParams::interactive()).with_tlv_capacity(128);
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(EnvelopeConfig::from_json_str(&json).unwrap(), cfg);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for json in [
            r#"{ "tlv_capacity": 2 }"#,
            r#"{ "tlv_capacity": 70000 }"#,
            r#"{ "kdf": { "time_cost": 0, "memory_kib": 64, "parallelism": 1 } }"#,
            r#"{ "max_kdf": { "time_cost": 1, "memory_kib": 0, "parallelism": 1 } }"#,
            r#"{ "key_mode_policy": "sometimes" }"#,
            "not json",
        ] {
            let err = EnvelopeConfig::from_json_str(json).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfig, "{json}");
        }
    }

    #[test]
    fn engine_refuses_invalid_config() {
        let cfg = EnvelopeConfig::default().with_tlv_capacity(1);
        let err = EnvelopeEngine::new(cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn smallest_capacity_still_encrypts() {
        let cfg = EnvelopeConfig::new(KdfParams::new(1, 64, 1)).with_tlv_capacity(3);
        let e = EnvelopeEngine::new(cfg).unwrap();
        let env = e.encrypt(b"x", &KeyMaterial::password("pw"), KeyMode::Password, b"").unwrap();
        assert_eq!(Envelope::parse(&env).unwrap().tlv(), &[1, 1, 0]);
    }
}
