//! Release gating: decide whether an artifact may be published to a channel
//!
//! # Flow
//!
//! ```text
//! "ppa:maas/2.9"                                 -> ChannelIdentifier
//! "maas_2.9.1~rc1-1-0ubuntu1_source.changes"     -> ArtifactVersion
//!                                        validate() -> ValidationOutcome
//! ```
//!
//! Both parsers are pure apart from the artifact open check, and
//! [`validator::validate`] has no side effects at all.

pub mod artifact;
pub mod channel;
pub mod validator;
pub mod version;

pub use artifact::{Artifact, ArtifactPattern, ArtifactVersion};
pub use channel::ChannelIdentifier;
pub use validator::{Rejection, ValidationOutcome, validate};
