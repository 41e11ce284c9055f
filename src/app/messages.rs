use crate::api::{ApiError, DownloadOutcome};
use crate::models::{Comment, Identity, TorrentDetail, TorrentSummary};

use super::{tasks, TorridApp};

pub enum AppMessage {
    Registered(Result<Identity, ApiError>),
    LoggedIn(Result<Identity, ApiError>),
    SearchCompleted(Result<Vec<TorrentSummary>, ApiError>),
    DetailLoaded {
        torrent_id: String,
        result: Result<TorrentDetail, ApiError>,
    },
    CommentsLoaded {
        torrent_id: String,
        result: Result<Vec<Comment>, ApiError>,
    },
    CommentPosted {
        torrent_id: String,
        result: Result<Comment, ApiError>,
    },
    DownloadFinished(Result<DownloadOutcome, ApiError>),
}

pub(super) fn process_messages(app: &mut TorridApp) {
    while let Ok(message) = app.rx.try_recv() {
        match message {
            AppMessage::Registered(result) => {
                app.register_form.submitting = false;
                match result {
                    Ok(identity) => {
                        app.register_form.error = None;
                        app.register_form.notice =
                            Some("Registered. You are now logged in.".into());
                        app.register_form.password.clear();
                        app.adopt_identity(identity);
                    }
                    Err(err) => {
                        app.register_form.error = Some(err.user_message("Registration failed"));
                    }
                }
            }
            AppMessage::LoggedIn(result) => {
                app.login_form.submitting = false;
                match result {
                    Ok(identity) => {
                        app.login_form.error = None;
                        app.login_form.notice = Some("Logged in.".into());
                        app.login_form.password.clear();
                        app.adopt_identity(identity);
                    }
                    Err(err) => {
                        app.login_form.error = Some(err.user_message("Login failed"));
                    }
                }
            }
            // Applied unconditionally: with overlapping searches, the response
            // that arrives last is the one left on screen.
            AppMessage::SearchCompleted(result) => {
                app.results_loading = false;
                match result {
                    Ok(results) => {
                        app.results_error = None;
                        app.results = results;
                    }
                    Err(err) => {
                        app.results_error = Some(err.user_message("Search failed"));
                    }
                }
            }
            AppMessage::DetailLoaded { torrent_id, result } => {
                let Some(detail) = app.detail.as_mut() else {
                    continue;
                };
                if detail.torrent_id != torrent_id {
                    continue;
                }
                detail.loading = false;
                match result {
                    Ok(torrent) => {
                        detail.error = None;
                        detail.torrent = Some(torrent);
                    }
                    Err(err) => {
                        detail.error = Some(err.user_message("Failed to load torrent"));
                    }
                }
            }
            AppMessage::CommentsLoaded { torrent_id, result } => {
                let Some(detail) = app.detail.as_mut() else {
                    continue;
                };
                if detail.torrent_id != torrent_id {
                    continue;
                }
                detail.comments_loading = false;
                match result {
                    Ok(comments) => {
                        detail.comments_error = None;
                        detail.comments = comments;
                    }
                    Err(err) => {
                        detail.comments_error = Some(err.user_message("Failed to load comments"));
                    }
                }
            }
            AppMessage::CommentPosted { torrent_id, result } => {
                let Some(detail) = app.detail.as_mut() else {
                    continue;
                };
                if detail.torrent_id != torrent_id {
                    continue;
                }
                detail.comment_form.sending = false;
                match result {
                    Ok(_) => {
                        detail.comment_form.error = None;
                        detail.comment_form.notice = Some("Comment posted.".into());
                        detail.comment_form.text.clear();
                        // One refetch each: the comment list, then the detail
                        // record for the updated aggregate rating.
                        detail.comments_loading = true;
                        detail.loading = true;
                        tasks::refresh_after_comment(app.api.clone(), app.tx.clone(), torrent_id);
                    }
                    Err(err) => {
                        detail.comment_form.error =
                            Some(err.user_message("Failed to post comment"));
                    }
                }
            }
            AppMessage::DownloadFinished(result) => {
                app.info_banner = Some(match result {
                    Ok(DownloadOutcome::Acknowledged(message)) => message,
                    Ok(DownloadOutcome::FilePayload) => {
                        "Download simulated; the server records the request.".into()
                    }
                    Err(err) => err.user_message("Download request failed"),
                });
            }
        }
    }
}
