//! The dialog presentation seam.
//!
//! Views never render dialogs themselves. They describe what to show in a
//! [`DialogRequest`] and hand it to a [`DialogService`].
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::info;

/// Width used by the movie detail dialogs.
pub const DIALOG_WIDTH: &str = "50%";

/// Which detail dialog to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    MovieDescription,
    MovieDirector,
}

/// Data handed to the dialog, with the wire names the dialogs read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DialogPayload {
    Description {
        #[serde(rename = "Title")]
        title: String,
        #[serde(rename = "Description")]
        description: String,
    },
    Director {
        #[serde(rename = "Title")]
        title: String,
        #[serde(rename = "Director")]
        director: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub data: DialogPayload,
    pub width: &'static str,
}

/// Something that can present a modal dialog.
pub trait DialogService: Send + Sync {
    fn open(&self, request: DialogRequest);
}

/// Writes each dialog to the log. Used by the command-line demo.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDialog;

impl DialogService for LogDialog {
    fn open(&self, request: DialogRequest) {
        let data = serde_json::to_string(&request.data).unwrap_or_default();
        info!(kind = ?request.kind, width = request.width, %data, "Open dialog");
    }
}

/// Forwards each dialog to a channel, for hosts that render dialogs elsewhere.
#[derive(Debug, Clone)]
pub struct ChannelDialog {
    sender: mpsc::UnboundedSender<DialogRequest>,
}

impl ChannelDialog {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DialogRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl DialogService for ChannelDialog {
    fn open(&self, request: DialogRequest) {
        // A closed receiver means nobody is presenting dialogs any more.
        let _ = self.sender.send(request);
    }
}
