//! LSP client state and notification handling

use std::ops::ControlFlow;

use async_lsp::lsp_types::{
    LogMessageParams, ProgressParams, PublishDiagnosticsParams, ShowMessageParams,
    WorkDoneProgressCreateParams,
};
use async_lsp::router::Router;
use async_lsp::{LanguageClient, ResponseError};

/// Client state for handling server-initiated notifications.
///
/// The front end only displays trees it explicitly asks for, so incoming
/// notifications are logged and otherwise ignored.
pub(super) struct ClientState;

/// Event to signal stopping the client
pub(super) struct Stop;

impl LanguageClient for ClientState {
    type Error = ResponseError;
    type NotifyResult = ControlFlow<async_lsp::Result<()>>;

    fn progress(&mut self, _: ProgressParams) -> Self::NotifyResult {
        ControlFlow::Continue(())
    }

    fn publish_diagnostics(&mut self, _: PublishDiagnosticsParams) -> Self::NotifyResult {
        ControlFlow::Continue(())
    }

    fn show_message(&mut self, params: ShowMessageParams) -> Self::NotifyResult {
        tracing::debug!("LSP message {:?}: {}", params.typ, params.message);
        ControlFlow::Continue(())
    }

    fn log_message(&mut self, params: LogMessageParams) -> Self::NotifyResult {
        tracing::debug!("LSP log {:?}: {}", params.typ, params.message);
        ControlFlow::Continue(())
    }

    fn work_done_progress_create(
        &mut self,
        _params: WorkDoneProgressCreateParams,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<(), ResponseError>> + Send + 'static>,
    > {
        Box::pin(async { Ok(()) })
    }
}

impl ClientState {
    pub fn new_router() -> Router<Self> {
        let mut router = Router::from_language_client(ClientState);
        router.request::<async_lsp::lsp_types::request::WorkDoneProgressCreate, _>(
            Self::work_done_progress_create,
        );
        router.event(Self::on_stop);
        router
    }

    fn on_stop(&mut self, _: Stop) -> ControlFlow<async_lsp::Result<()>> {
        ControlFlow::Break(Ok(()))
    }
}
