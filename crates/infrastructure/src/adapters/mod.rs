//! Adapters for the provider API, the browser and the terminal.

mod console_presenter;
mod prompt_selector;
mod reqwest_client;
mod system_browser;

pub use console_presenter::ConsoleLinkPresenter;
pub use prompt_selector::InquireResumeSelector;
pub use reqwest_client::ReqwestResumeApi;
pub use system_browser::SystemBrowser;
