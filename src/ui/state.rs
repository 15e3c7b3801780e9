#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiState,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub current_route: Route,
    pub sidebar_index: usize,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Route {
    #[default]
    LikedSongs,
    Search,
    History,
    Following,
    Notifications,
    Lyrics,
}

impl Route {
    pub const SIDEBAR: [Route; 5] = [
        Route::LikedSongs,
        Route::Search,
        Route::History,
        Route::Following,
        Route::Notifications,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Route::LikedSongs => "Liked Songs",
            Route::Search => "Search",
            Route::History => "History",
            Route::Following => "Following",
            Route::Notifications => "Notifications",
            Route::Lyrics => "Lyrics",
        }
    }
}
