use crate::error::{Error, Result};
use crate::in_toto::{DSSE_PAYLOAD_TYPE, Statement};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde_as(as = "serde_with::base64::Base64")]
    pub sig: Vec<u8>,
    pub keyid: String,
}

/// A DSSE envelope. Envelopes produced here carry no signatures; an
/// external signer appends them.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde_as(as = "serde_with::base64::Base64")]
    payload: Vec<u8>,
    payload_type: String,
    signatures: Vec<Signature>,
}

impl Envelope {
    pub fn new(payload: &[u8], payload_type: String) -> Self {
        Self {
            payload: payload.to_vec(),
            payload_type,
            signatures: vec![],
        }
    }

    /// Wraps the compact JSON form of `statement` as an in-toto payload.
    pub fn wrap<P: Serialize>(statement: &Statement<P>) -> Result<Self> {
        let payload = statement.to_json()?;
        Ok(Self::new(&payload, DSSE_PAYLOAD_TYPE.to_string()))
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn payload_type(&self) -> &str {
        &self.payload_type
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn add_signature(&mut self, sig: Vec<u8>, keyid: String) -> Result<()> {
        if sig.is_empty() {
            return Err(Error::Validation(
                "DSSE signature cannot be empty".to_string(),
            ));
        }

        self.signatures.push(Signature { sig, keyid });
        Ok(())
    }

    /// Pre-authentication encoding of the payload, the exact bytes a DSSE
    /// signer has to sign.
    pub fn pae(&self) -> Vec<u8> {
        let mut out = format!(
            "DSSEv1 {} {} {} ",
            self.payload_type.len(),
            self.payload_type,
            self.payload.len()
        )
        .into_bytes();
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn to_json_pretty(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}
