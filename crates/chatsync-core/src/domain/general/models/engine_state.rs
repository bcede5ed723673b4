// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineState {
    /// No user is signed in.
    #[default]
    Idle,
    LoadingPreviews,
    /// Loading the conversation previews failed. `refresh_previews` retries.
    PreviewsUnavailable,
    Ready,
}
