use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use openssl::{
    asn1::Asn1Time,
    bn::{BigNum, MsbOption},
    error::ErrorStack,
    hash::MessageDigest,
    nid::Nid,
    pkey::{PKey, Private},
    rsa::Rsa,
    ssl::{SslAcceptor, SslAcceptorBuilder, SslFiletype, SslMethod},
    x509::{X509NameBuilder, X509},
};

/// How the server accepts connections.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Transport {
    /// Plain HTTP.
    Insecure,
    /// HTTPS using the certificate at `<prefix>.crt` and the key at `<prefix>.key`.
    Certificate(PathBuf),
    /// HTTPS using a throwaway self-signed certificate generated at startup.
    AdHoc,
}

impl Transport {
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Insecure => "http",
            Self::Certificate(_) | Self::AdHoc => "https",
        }
    }

    /// Returns a banner describing this transport for the startup logs.
    pub fn banner(&self) -> &'static str {
        match self {
            Self::Insecure => "RUNNING UNSECURED",
            Self::Certificate(_) => "Running with TLS",
            Self::AdHoc => "Running with TLS (ad-hoc)",
        }
    }

    /// Builds the TLS acceptor for this transport, or returns `None` for plain HTTP.
    pub fn ssl_acceptor(&self) -> Result<Option<SslAcceptor>> {
        match self {
            Self::Insecure => Ok(None),
            Self::Certificate(prefix) => Ok(Some(certificate_acceptor(prefix)?)),
            Self::AdHoc => {
                let (certificate, key) = generate_adhoc_certificate()
                    .context("Failed to generate an ad-hoc TLS certificate.")?;
                let mut builder = acceptor_builder()?;
                builder.set_certificate(&certificate)?;
                builder.set_private_key(&key)?;
                builder.check_private_key()?;
                Ok(Some(builder.build()))
            }
        }
    }
}

fn acceptor_builder() -> Result<SslAcceptorBuilder, ErrorStack> {
    SslAcceptor::mozilla_intermediate_v5(SslMethod::tls())
}

/// Returns the certificate and key paths for a certificate prefix.
///
/// The extensions are appended rather than substituted, so `certs/eightbot.prod` loads
/// `certs/eightbot.prod.crt` and `certs/eightbot.prod.key`.
pub fn certificate_paths(prefix: &Path) -> (PathBuf, PathBuf) {
    let with_suffix = |suffix: &str| {
        let mut path = prefix.as_os_str().to_owned();
        path.push(suffix);
        PathBuf::from(path)
    };
    (with_suffix(".crt"), with_suffix(".key"))
}

fn certificate_acceptor(prefix: &Path) -> Result<SslAcceptor> {
    let (certificate_path, key_path) = certificate_paths(prefix);
    let mut builder = acceptor_builder()?;
    builder
        .set_certificate_chain_file(&certificate_path)
        .with_context(|| {
            format!("Failed to load TLS certificate {}.", certificate_path.display())
        })?;
    builder
        .set_private_key_file(&key_path, SslFiletype::PEM)
        .with_context(|| format!("Failed to load TLS key {}.", key_path.display()))?;
    builder
        .check_private_key()
        .context("The TLS certificate and key do not match.")?;
    Ok(builder.build())
}

/// Generates a self-signed certificate that lives only as long as the process.
pub fn generate_adhoc_certificate() -> Result<(X509, PKey<Private>), ErrorStack> {
    let key = PKey::from_rsa(Rsa::generate(2048)?)?;
    let mut name = X509NameBuilder::new()?;
    name.append_entry_by_nid(Nid::ORGANIZATIONNAME, "Dummy Certificate")?;
    name.append_entry_by_nid(Nid::COMMONNAME, "*")?;
    let name = name.build();
    let mut serial = BigNum::new()?;
    serial.rand(159, MsbOption::MAYBE_ZERO, false)?;
    let serial = serial.to_asn1_integer()?;
    let not_before = Asn1Time::days_from_now(0)?;
    let not_after = Asn1Time::days_from_now(365)?;
    let mut builder = X509::builder()?;
    builder.set_version(2)?;
    builder.set_serial_number(&serial)?;
    builder.set_subject_name(&name)?;
    builder.set_issuer_name(&name)?;
    builder.set_pubkey(&key)?;
    builder.set_not_before(&not_before)?;
    builder.set_not_after(&not_after)?;
    builder.sign(&key, MessageDigest::sha256())?;
    Ok((builder.build(), key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemes() {
        assert_eq!(Transport::Insecure.scheme(), "http");
        assert_eq!(Transport::AdHoc.scheme(), "https");
        let certificate = Transport::Certificate(PathBuf::from("eightbot"));
        assert_eq!(certificate.scheme(), "https")
    }

    #[test]
    fn certificate_paths_append_extensions() {
        let (certificate, key) = certificate_paths(Path::new("certs/eightbot.prod"));
        assert_eq!(certificate, PathBuf::from("certs/eightbot.prod.crt"));
        assert_eq!(key, PathBuf::from("certs/eightbot.prod.key"))
    }

    #[test]
    fn insecure_has_no_acceptor() {
        assert!(Transport::Insecure.ssl_acceptor().unwrap().is_none())
    }

    #[test]
    fn adhoc_certificate_is_self_signed_for_its_key() {
        let (certificate, key) = generate_adhoc_certificate().unwrap();
        assert!(certificate.verify(&key).unwrap());
        let common_name = certificate
            .subject_name()
            .entries_by_nid(Nid::COMMONNAME)
            .next()
            .map(|entry| entry.data().as_slice().to_vec());
        assert_eq!(common_name, Some(b"*".to_vec()))
    }

    #[test]
    fn adhoc_has_acceptor() {
        assert!(Transport::AdHoc.ssl_acceptor().unwrap().is_some())
    }

    #[test]
    fn missing_certificate_fails() {
        let transport = Transport::Certificate(PathBuf::from("./does-not-exist/eightbot"));
        let error = transport.ssl_acceptor().err().unwrap();
        assert!(error.to_string().contains("does-not-exist/eightbot.crt"))
    }
}
