#[cfg(test)]
pub mod tests {
    use once_cell::sync::Lazy;
    use rsa::pkcs8::{EncodePrivateKey, LineEnding};
    use rsa::RsaPrivateKey;

    use crate::key::normalize_private_key;
    use crate::settings::Settings;
    use crate::signing::RequestSigner;

    // Generated once per test binary; RSA key generation is too slow to
    // repeat per test.
    static TEST_KEY: Lazy<RsaPrivateKey> = Lazy::new(|| {
        let mut rng = rand::thread_rng();
        RsaPrivateKey::new(&mut rng, 2048).expect("test RSA key generation")
    });

    pub fn test_key_pem() -> String {
        TEST_KEY
            .to_pkcs8_pem(LineEnding::LF)
            .expect("PEM-encode test key")
            .to_string()
    }

    pub fn test_signer() -> RequestSigner {
        let key = normalize_private_key(&test_key_pem()).expect("normalize test key");
        RequestSigner::from_pem(&key).expect("parse test key")
    }

    pub fn test_settings_str() -> String {
        format!(
            r#"
            [api]
            login = "test-user"
            endpoint = "api.example.com"
            mode = "readwrite"
            private_key = """
{}"""
            "#,
            test_key_pem()
        )
    }

    pub fn create_test_settings() -> Settings {
        Settings::from_toml(&test_settings_str()).expect("Invalid config")
    }
}
