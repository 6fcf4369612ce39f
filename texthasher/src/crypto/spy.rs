//! Recording stand-in for [`PasswordEncoder`] used by the hasher tests.

use std::sync::Mutex;

use super::encoder::{EncoderError, PasswordEncoder};

/// One call made against the spy, with what it handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EncoderCall {
    Encode {
        plain_text: String,
        returned: String,
    },
    Matches {
        plain_text: String,
        encoded: String,
        returned: bool,
    },
    UpgradeEncoding {
        encoded: String,
        returned: bool,
    },
}

#[derive(Debug, Default)]
pub(crate) struct PasswordEncoderSpy {
    /// Calls in the order they were made.
    pub calls: Mutex<Vec<EncoderCall>>,
    /// Value handed back from `matches` and `upgrade_encoding`.
    pub answer: bool,
}

impl PasswordEncoderSpy {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    pub fn recorded(&self) -> Vec<EncoderCall> {
        self.calls.lock().expect("spy lock poisoned").clone()
    }
}

impl PasswordEncoder for PasswordEncoderSpy {
    fn encode(&self, plain_text: &str) -> Result<String, EncoderError> {
        let mut calls = self.calls.lock().expect("spy lock poisoned");
        let returned = format!("spy-encoded-{}", calls.len());
        calls.push(EncoderCall::Encode {
            plain_text: plain_text.to_string(),
            returned: returned.clone(),
        });
        Ok(returned)
    }

    fn matches(&self, plain_text: &str, encoded: &str) -> Result<bool, EncoderError> {
        self.calls
            .lock()
            .expect("spy lock poisoned")
            .push(EncoderCall::Matches {
                plain_text: plain_text.to_string(),
                encoded: encoded.to_string(),
                returned: self.answer,
            });
        Ok(self.answer)
    }

    fn upgrade_encoding(&self, encoded: &str) -> Result<bool, EncoderError> {
        self.calls
            .lock()
            .expect("spy lock poisoned")
            .push(EncoderCall::UpgradeEncoding {
                encoded: encoded.to_string(),
                returned: self.answer,
            });
        Ok(self.answer)
    }
}
