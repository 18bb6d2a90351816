//! The preview/download surface

use crate::artifact::Artifact;
use crate::ExportError;

/// UI state driven by the exporter
pub trait ExportView<H> {
    /// Disable (and relabel) the trigger while an export runs
    fn set_busy(&mut self, busy: bool);

    /// Point preview and download at a new artifact
    fn show_artifact(&mut self, artifact: &Artifact<H>);

    /// Empty placeholder with a disabled download action
    fn show_empty(&mut self);

    /// Tell the user an export failed
    fn notify_failure(&mut self, error: &ExportError);
}
