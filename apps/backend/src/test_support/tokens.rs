//! RS256 token minting for tests, from the static test keypair.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::auth::AccessClaims;
use crate::test_support::keys::{
    OTHER_RSA_PRIVATE_PEM, TEST_KID, TEST_RSA_MODULUS, TEST_RSA_PRIVATE_PEM,
};

/// Issuer baked into test tokens and test verifiers.
pub const TEST_ISSUER: &str = "http://localhost:8081/realms/notes";

/// Builder for test tokens. Defaults produce a valid token for the seeded
/// test key set; each knob breaks exactly one verification check.
pub struct TokenMint {
    sub: String,
    issuer: String,
    kid: String,
    exp_offset_secs: i64,
    private_pem: &'static str,
}

impl TokenMint {
    pub fn for_subject(sub: &str) -> Self {
        Self {
            sub: sub.to_string(),
            issuer: TEST_ISSUER.to_string(),
            kid: TEST_KID.to_string(),
            exp_offset_secs: 3600,
            private_pem: TEST_RSA_PRIVATE_PEM,
        }
    }

    pub fn issuer(mut self, issuer: &str) -> Self {
        self.issuer = issuer.to_string();
        self
    }

    pub fn kid(mut self, kid: &str) -> Self {
        self.kid = kid.to_string();
        self
    }

    /// Well past any validation leeway.
    pub fn expired(mut self) -> Self {
        self.exp_offset_secs = -3600;
        self
    }

    /// Sign with a key whose public half is not in the test key set, under
    /// the known kid.
    pub fn wrong_key(mut self) -> Self {
        self.private_pem = OTHER_RSA_PRIVATE_PEM;
        self
    }

    fn claims(&self) -> AccessClaims {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_secs() as i64;
        AccessClaims {
            sub: self.sub.clone(),
            iss: self.issuer.clone(),
            exp: (now + self.exp_offset_secs).max(0) as u64,
            preferred_username: Some(self.sub.clone()),
        }
    }

    pub fn token(&self) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.kid.clone());
        let key = EncodingKey::from_rsa_pem(self.private_pem.as_bytes())
            .expect("static test key parses");
        encode(&header, &self.claims(), &key).expect("test token encodes")
    }

    /// An HS256 token using public key material as the shared secret, for
    /// algorithm-confusion tests. Carries the known kid.
    pub fn hs256(&self) -> String {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(self.kid.clone());
        let key = EncodingKey::from_secret(TEST_RSA_MODULUS.as_bytes());
        encode(&header, &self.claims(), &key).expect("test token encodes")
    }
}
