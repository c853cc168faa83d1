//! TLS client configuration for the feed connection.
//!
//! Three trust modes are supported:
//! - [`TlsMode::Verified`] — tokio-tungstenite's built-in webpki roots
//! - [`TlsMode::Pinned`] — only the CA certificates from a PEM bundle
//! - [`TlsMode::Insecure`] — any server certificate is accepted
//!
//! Insecure mode must be requested explicitly through configuration.
//! Handshake signatures are still checked in that mode; only the
//! certificate chain and host name are not.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{CryptoProvider, verify_tls12_signature, verify_tls13_signature};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tracing::warn;

use crate::{PumpwatchError, Result};

/// How the server certificate is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsMode {
    /// Validate against the bundled webpki root store.
    #[default]
    Verified,
    /// Validate against the certificates in the given PEM file only.
    Pinned(PathBuf),
    /// Skip certificate validation entirely.
    Insecure,
}

impl TlsMode {
    /// Returns a short label for display in the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            TlsMode::Verified => "TLS",
            TlsMode::Pinned(_) => "TLS pinned",
            TlsMode::Insecure => "INSECURE TLS",
        }
    }

    /// Returns `true` if certificate validation is disabled.
    pub fn is_insecure(&self) -> bool {
        matches!(self, TlsMode::Insecure)
    }
}

/// Builds the rustls configuration for the given mode.
///
/// Returns `None` for [`TlsMode::Verified`], in which case the connector
/// built into tokio-tungstenite is used.
///
/// # Errors
///
/// Returns [`PumpwatchError::Tls`] if the pinned PEM cannot be read or
/// holds no usable certificate.
pub fn build_tls_config(mode: &TlsMode) -> Result<Option<Arc<ClientConfig>>> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let config = match mode {
        TlsMode::Verified => return Ok(None),
        TlsMode::Pinned(path) => pinned_config(path, provider)?,
        TlsMode::Insecure => {
            warn!("Certificate validation is disabled for the feed connection");
            ClientConfig::builder_with_provider(provider.clone())
                .with_safe_default_protocol_versions()
                .map_err(|e| PumpwatchError::Tls(e.to_string()))?
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate(provider)))
                .with_no_client_auth()
        }
    };

    Ok(Some(Arc::new(config)))
}

/// Builds a [`ClientConfig`] whose root store contains only the
/// certificates found in the PEM file at `path`.
fn pinned_config(path: &Path, provider: Arc<CryptoProvider>) -> Result<ClientConfig> {
    let pem = std::fs::read(path).map_err(|e| {
        PumpwatchError::Tls(format!("failed to read CA PEM {}: {e}", path.display()))
    })?;

    let certs: Vec<_> = rustls_pemfile::certs(&mut &pem[..])
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| PumpwatchError::Tls(format!("failed to parse CA PEM: {e}")))?;

    let mut root_store = RootCertStore::empty();
    let (added, ignored) = root_store.add_parsable_certificates(certs);
    if added == 0 {
        return Err(PumpwatchError::Tls(format!(
            "no usable CA certificate in {}",
            path.display()
        )));
    }
    if ignored > 0 {
        warn!(ignored, path = %path.display(), "Skipped unparsable CA certificates");
    }

    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| PumpwatchError::Tls(e.to_string()))?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}

/// Accepts every server certificate while still verifying handshake
/// signatures with the provider's algorithms.
#[derive(Debug)]
struct AcceptAnyCertificate(Arc<CryptoProvider>);

impl ServerCertVerifier for AcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}
