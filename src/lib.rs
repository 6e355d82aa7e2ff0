pub use crate::errors::{BuildError, ParseError};

pub mod classify;
pub mod cli;
pub mod corpus;
pub mod encoding;
pub mod errors;
pub mod subtoken;
pub mod syntax;
pub mod vocab;

pub use classify::{classify, NodeClass};
pub use corpus::{build, BuildOptions, BuildReport, CorpusBuilder, CorpusFile, FileStatus};
pub use encoding::{encode, encode_to_string, for_each_token, EncodingConfig, EncodingMode};
pub use subtoken::{subtokenize, subtokenize_text};
pub use syntax::{SourceParser, SutraParser, SyntaxNode};
pub use vocab::{TokenCounts, VocabEntry, Vocabulary};
