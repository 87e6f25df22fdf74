//! About dialog: restaurant address and phone.

use std::sync::Arc;

use multicourse_core::{AboutInfo, LoadState};
use tokio::sync::watch;
use tracing::warn;

use crate::app::Dependencies;
use crate::messages::ABOUT_ERROR;
use crate::navigation::Navigator;
use crate::scope::ViewModelScope;
use crate::state::StateHolder;
use crate::usecases::UseCases;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AboutState {
    pub about: LoadState<AboutInfo>,
    pub error_message: Option<String>,
}

struct Inner {
    use_cases: Arc<UseCases>,
    state: StateHolder<AboutState>,
}

pub struct AboutViewModel {
    inner: Arc<Inner>,
    navigator: Navigator,
    scope: ViewModelScope,
}

impl AboutViewModel {
    pub fn new(deps: &Dependencies) -> Self {
        let vm = AboutViewModel {
            inner: Arc::new(Inner {
                use_cases: deps.use_cases.clone(),
                state: StateHolder::new(AboutState::default()),
            }),
            navigator: deps.navigator.clone(),
            scope: ViewModelScope::new(),
        };

        let inner = vm.inner.clone();
        vm.scope.launch(async move { inner.load().await });
        vm
    }

    pub fn state(&self) -> AboutState {
        self.inner.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<AboutState> {
        self.inner.state.subscribe()
    }

    /// `tel:` link for the call button, once loaded.
    pub fn dial_uri(&self) -> Option<String> {
        self.inner
            .state
            .with(|s| s.about.value().map(AboutInfo::dial_uri))
    }

    pub fn on_dismiss(&self) {
        self.navigator.close_dialog();
    }

    pub fn hide_error(&self) {
        self.inner.state.update(|s| s.error_message = None);
    }
}

impl Inner {
    async fn load(&self) {
        let result = self.use_cases.get_about_info.execute().await;
        if let Err(e) = &result {
            warn!(error = %e, "Could not load about info");
        }
        self.state.update(|s| {
            if result.is_err() {
                s.error_message = Some(ABOUT_ERROR.to_string());
            }
            s.about = LoadState::from(result);
        });
    }
}
