use std::sync::mpsc::Sender;
use std::thread;

use log::error;

use crate::api::ApiClient;
use crate::models::{CreateCommentInput, LoginInput, RegisterInput, SearchQuery};

use super::messages::AppMessage;

pub fn register(client: ApiClient, tx: Sender<AppMessage>, input: RegisterInput) {
    thread::spawn(move || {
        let result = client.register(&input);
        if tx.send(AppMessage::Registered(result)).is_err() {
            error!("failed to send Registered message");
        }
    });
}

pub fn login(client: ApiClient, tx: Sender<AppMessage>, input: LoginInput) {
    thread::spawn(move || {
        let result = client.login(&input);
        if tx.send(AppMessage::LoggedIn(result)).is_err() {
            error!("failed to send LoggedIn message");
        }
    });
}

pub fn search(client: ApiClient, tx: Sender<AppMessage>, query: SearchQuery) {
    thread::spawn(move || {
        let result = client.search_torrents(&query);
        if tx.send(AppMessage::SearchCompleted(result)).is_err() {
            error!("failed to send SearchCompleted message");
        }
    });
}

/// Loads the detail record and then the comment list, in page order, each
/// reported as its own message.
pub fn open_torrent(client: ApiClient, tx: Sender<AppMessage>, torrent_id: String) {
    thread::spawn(move || {
        let result = client.get_torrent(&torrent_id);
        let message = AppMessage::DetailLoaded {
            torrent_id: torrent_id.clone(),
            result,
        };
        if tx.send(message).is_err() {
            error!("failed to send DetailLoaded message");
            return;
        }
        let result = client.list_comments(&torrent_id);
        if tx
            .send(AppMessage::CommentsLoaded { torrent_id, result })
            .is_err()
        {
            error!("failed to send CommentsLoaded message");
        }
    });
}

pub fn post_comment(
    client: ApiClient,
    tx: Sender<AppMessage>,
    user_id: String,
    input: CreateCommentInput,
) {
    thread::spawn(move || {
        let torrent_id = input.torrent_id.clone();
        let result = client.create_comment(&user_id, &input);
        if tx
            .send(AppMessage::CommentPosted { torrent_id, result })
            .is_err()
        {
            error!("failed to send CommentPosted message");
        }
    });
}

/// After a comment lands: reload the comment list, then the bare detail record
/// so the aggregate rating catches up. One fetch each.
pub fn refresh_after_comment(client: ApiClient, tx: Sender<AppMessage>, torrent_id: String) {
    thread::spawn(move || {
        let result = client.list_comments(&torrent_id);
        let message = AppMessage::CommentsLoaded {
            torrent_id: torrent_id.clone(),
            result,
        };
        if tx.send(message).is_err() {
            error!("failed to send CommentsLoaded message");
            return;
        }
        let result = client.get_torrent(&torrent_id);
        if tx
            .send(AppMessage::DetailLoaded { torrent_id, result })
            .is_err()
        {
            error!("failed to send DetailLoaded message");
        }
    });
}

pub fn download(client: ApiClient, tx: Sender<AppMessage>, torrent_id: String, user_id: String) {
    thread::spawn(move || {
        let result = client.download_torrent(&torrent_id, &user_id);
        if tx.send(AppMessage::DownloadFinished(result)).is_err() {
            error!("failed to send DownloadFinished message");
        }
    });
}
