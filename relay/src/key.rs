//! Routing key decoding.
//!
//! A routing key is a Base64 string carrying everything needed to deliver a single
//! message: `host:port|user|password[|from[|to]]`. Keys travel in the `key` query
//! parameter, so a request is self-contained and the relay keeps no account table.

use core::fmt;

use base64::prelude::*;

const FIELD_SEPARATOR: char = '|';

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("invalid base64 key: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("key is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("expected 3 to 5 key fields, found {0}")]
    FieldCount(usize),

    #[error("invalid smtp host:port '{0}'")]
    HostPort(String),

    #[error("{0} contains the '|' field separator")]
    Separator(&'static str),
}

/// SMTP target, credentials and envelope addresses for one delivery.
#[derive(Clone, PartialEq, Eq)]
pub struct RoutingSpec {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub auth_user: String,
    pub auth_password: String,
    pub from_address: String,
    pub to_address: String,
}

impl RoutingSpec {
    /// Decode a routing key.
    ///
    /// The from/to overrides fall back to the authenticating account when they are
    /// absent or empty.
    pub fn decode(key: &str) -> Result<RoutingSpec, KeyError> {
        // Query decoding turns '+' into ' '; Base64 never contains spaces.
        let key = key.trim().replace(' ', "+");
        let bytes = BASE64_STANDARD.decode(key.as_bytes())?;
        let decoded = String::from_utf8(bytes)?;

        let fields: Vec<&str> = decoded.split(FIELD_SEPARATOR).collect();
        if !(3..=5).contains(&fields.len()) {
            return Err(KeyError::FieldCount(fields.len()));
        }

        let (smtp_host, smtp_port) = parse_host_port(fields[0])?;
        let auth_user = fields[1].to_string();
        let auth_password = fields[2].to_string();

        let from_address = override_or(fields.get(3), &auth_user);
        let to_address = override_or(fields.get(4), &auth_user);

        Ok(RoutingSpec {
            smtp_host,
            smtp_port,
            auth_user,
            auth_password,
            from_address,
            to_address,
        })
    }

    /// Encode this spec as a routing key.
    ///
    /// Overrides equal to the account are omitted, so the shortest equivalent key is
    /// produced. Fails if any field contains `|`, which no key can carry.
    pub fn encode(&self) -> Result<String, KeyError> {
        let named = [
            ("smtp host", &self.smtp_host),
            ("auth user", &self.auth_user),
            ("auth password", &self.auth_password),
            ("from address", &self.from_address),
            ("to address", &self.to_address),
        ];
        if let Some((name, _)) = named.iter().find(|(_, v)| v.contains(FIELD_SEPARATOR)) {
            return Err(KeyError::Separator(*name));
        }

        let mut fields = vec![
            format!("{}:{}", self.smtp_host, self.smtp_port),
            self.auth_user.clone(),
            self.auth_password.clone(),
        ];

        let custom_from = self.from_address != self.auth_user;
        let custom_to = self.to_address != self.auth_user;
        if custom_from || custom_to {
            fields.push(if custom_from { self.from_address.clone() } else { String::new() });
        }
        if custom_to {
            fields.push(self.to_address.clone());
        }

        Ok(BASE64_STANDARD.encode(fields.join("|")))
    }
}

impl fmt::Debug for RoutingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingSpec")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("auth_user", &self.auth_user)
            .field("auth_password", &"<redacted>")
            .field("from_address", &self.from_address)
            .field("to_address", &self.to_address)
            .finish()
    }
}

fn parse_host_port(token: &str) -> Result<(String, u16), KeyError> {
    let invalid = || KeyError::HostPort(token.to_string());

    let (host, port) = token.rsplit_once(':').ok_or_else(invalid)?;
    if host.is_empty() {
        return Err(invalid());
    }
    let port: u16 = port.parse().map_err(|_| invalid())?;
    if port == 0 {
        return Err(invalid());
    }

    Ok((host.to_string(), port))
}

fn override_or(field: Option<&&str>, default: &str) -> String {
    match field {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}
