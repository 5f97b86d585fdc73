//! # Framecheck Pipeline
//!
//! The sequential analysis pipeline tying the framecheck stages
//! together: decode collaborator → metrics → classification →
//! {annotation → encode collaborator, report}.
//!
//! ```rust,ignore
//! use framecheck_pipeline::{Analyzer, AnalyzerConfig, CancelToken};
//!
//! let analyzer = Analyzer::with_config(AnalyzerConfig::default());
//! let run = analyzer.run(&mut source, Some(&mut sink), None)?;
//! println!("{}", run.report.to_json_pretty()?);
//!
//! // Re-tune thresholds without re-decoding:
//! let retuned = run.session.reclassify(new_thresholds)?;
//! ```

pub mod analyzer;
pub mod cancel;
pub mod session;

pub use analyzer::{AnalysisRun, Analyzer, AnalyzerConfig};
pub use cancel::CancelToken;
pub use session::AnalysisSession;
