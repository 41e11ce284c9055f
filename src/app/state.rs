use crate::models::{Comment, CreateCommentInput, TorrentDetail};

#[derive(Default)]
pub struct RegisterFormState {
    pub username: String,
    pub email: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[derive(Default)]
pub struct LoginFormState {
    pub username: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

pub struct CommentFormState {
    pub text: String,
    pub rating: u8,
    pub sending: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl Default for CommentFormState {
    fn default() -> Self {
        Self {
            text: String::new(),
            rating: 5,
            sending: false,
            error: None,
            notice: None,
        }
    }
}

/// Everything shown in the detail section. Created when a torrent is opened
/// and replaced wholesale when another one is; never torn down after that.
pub struct DetailState {
    pub torrent_id: String,
    pub torrent: Option<TorrentDetail>,
    pub loading: bool,
    pub error: Option<String>,
    pub comments: Vec<Comment>,
    pub comments_loading: bool,
    pub comments_error: Option<String>,
    pub comment_form: CommentFormState,
}

impl DetailState {
    pub fn opening(torrent_id: String) -> Self {
        Self {
            torrent_id,
            torrent: None,
            loading: true,
            error: None,
            comments: Vec::new(),
            comments_loading: true,
            comments_error: None,
            comment_form: CommentFormState::default(),
        }
    }

    /// A new comment always attaches to the torrent this section shows.
    pub fn comment_input(&self) -> CreateCommentInput {
        CreateCommentInput {
            torrent_id: self.torrent_id.clone(),
            text: self.comment_form.text.trim().to_string(),
            rating: self.comment_form.rating,
        }
    }
}
