use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, NaiveDateTime, Utc};
use eframe::egui::{self, Context};
use log::error;

use crate::api::ApiClient;
use crate::models::{Identity, LoginInput, RegisterInput, SearchQuery, TorrentSummary};
use crate::session::SessionStore;

mod messages;
mod state;
mod tasks;
mod ui;

use messages::AppMessage;
use state::{DetailState, LoginFormState, RegisterFormState};

pub struct TorridApp {
    api: ApiClient,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    session_store: SessionStore,
    session: Option<Identity>,
    register_form: RegisterFormState,
    login_form: LoginFormState,
    search_query: SearchQuery,
    results: Vec<TorrentSummary>,
    results_loading: bool,
    results_error: Option<String>,
    detail: Option<DetailState>,
    base_url_input: String,
    info_banner: Option<String>,
}

impl TorridApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let default_url = std::env::var("TORRID_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000/api".to_string());
        let api = ApiClient::new(default_url).unwrap_or_else(|err| {
            error!("failed to initialise API client: {err}");
            ApiClient::new("http://127.0.0.1:5000/api").expect("fallback API client")
        });
        let mut app = Self::with_api(api, SessionStore::open_default());
        // An unfiltered search populates the initial catalogue view.
        app.spawn_search();
        app
    }

    fn with_api(api: ApiClient, session_store: SessionStore) -> Self {
        let (tx, rx) = mpsc::channel();
        let session = session_store.load();
        let base_url_input = api.base_url().to_string();
        Self {
            api,
            tx,
            rx,
            session_store,
            session,
            register_form: RegisterFormState::default(),
            login_form: LoginFormState::default(),
            search_query: SearchQuery::default(),
            results: Vec::new(),
            results_loading: false,
            results_error: None,
            detail: None,
            base_url_input,
            info_banner: None,
        }
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }

    // Searches are never debounced or cancelled; an older in-flight search
    // overwrites a newer one if its response lands last.
    pub(crate) fn spawn_search(&mut self) {
        self.results_loading = true;
        tasks::search(self.api.clone(), self.tx.clone(), self.search_query.clone());
    }

    pub(crate) fn spawn_register(&mut self) {
        let username = self.register_form.username.trim().to_string();
        let email = self.register_form.email.trim().to_string();
        let password = self.register_form.password.clone();
        if username.is_empty() || email.is_empty() || password.is_empty() {
            self.register_form.error = Some("All fields are required".into());
            return;
        }
        self.register_form.submitting = true;
        self.register_form.error = None;
        self.register_form.notice = None;
        let input = RegisterInput {
            username,
            email,
            password,
        };
        tasks::register(self.api.clone(), self.tx.clone(), input);
    }

    pub(crate) fn spawn_login(&mut self) {
        let username = self.login_form.username.trim().to_string();
        let password = self.login_form.password.clone();
        if username.is_empty() || password.is_empty() {
            self.login_form.error = Some("Username and password are required".into());
            return;
        }
        self.login_form.submitting = true;
        self.login_form.error = None;
        self.login_form.notice = None;
        let input = LoginInput { username, password };
        tasks::login(self.api.clone(), self.tx.clone(), input);
    }

    pub(crate) fn adopt_identity(&mut self, identity: Identity) {
        self.session = Some(identity);
        self.persist_session();
    }

    pub(crate) fn logout(&mut self) {
        self.session = None;
        self.persist_session();
    }

    fn persist_session(&self) {
        if let Err(err) = self.session_store.save(self.session.as_ref()) {
            error!("failed to persist session: {err:#}");
        }
    }

    /// Opens the detail view: sets the selected torrent and fetches its record
    /// and comment thread. There is no way back to "nothing selected".
    pub(crate) fn open_torrent(&mut self, torrent_id: &str) {
        self.detail = Some(DetailState::opening(torrent_id.to_string()));
        tasks::open_torrent(self.api.clone(), self.tx.clone(), torrent_id.to_string());
    }

    pub(crate) fn spawn_submit_comment(&mut self) {
        let Some(identity) = self.session.clone() else {
            if let Some(detail) = self.detail.as_mut() {
                detail.comment_form.error = Some("You must be logged in to comment.".into());
            }
            return;
        };
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let input = detail.comment_input();
        if input.text.is_empty() {
            detail.comment_form.error = Some("Comment text cannot be empty".into());
            return;
        }
        detail.comment_form.sending = true;
        detail.comment_form.error = None;
        detail.comment_form.notice = None;
        tasks::post_comment(self.api.clone(), self.tx.clone(), identity.id, input);
    }

    pub(crate) fn spawn_download(&mut self, torrent_id: String) {
        let Some(identity) = self.session.as_ref() else {
            self.info_banner = Some("You must be logged in to download.".into());
            return;
        };
        tasks::download(
            self.api.clone(),
            self.tx.clone(),
            torrent_id,
            identity.id.clone(),
        );
    }
}

impl eframe::App for TorridApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        let mut do_logout = false;

        egui::TopBottomPanel::top("top_controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Torrid");
                ui.separator();
                ui.label("API Base URL");
                ui.text_edit_singleline(&mut self.base_url_input);
                if ui.button("Apply").clicked() {
                    match self.api.set_base_url(self.base_url_input.clone()) {
                        Ok(()) => {
                            self.info_banner = Some("API URL updated".into());
                            self.spawn_search();
                        }
                        Err(err) => {
                            self.info_banner = Some(format!("Failed to update URL: {err}"));
                        }
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match &self.session {
                        Some(identity) => {
                            if ui.button("Log out").clicked() {
                                do_logout = true;
                            }
                            ui.label(format!(
                                "Logged in as {} ({})",
                                identity.username, identity.role
                            ));
                        }
                        None => {
                            ui.label("Not logged in.");
                        }
                    }
                });
            });

            if let Some(message) = self.info_banner.clone() {
                let mut dismiss = false;
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(message.as_str());
                            if ui.button("Dismiss").clicked() {
                                dismiss = true;
                            }
                        });
                    });
                if dismiss {
                    self.info_banner = None;
                }
            }
        });

        if do_logout {
            self.logout();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_auth(ui);
                ui.separator();
                self.render_search(ui);
                if self.detail.is_some() {
                    ui.separator();
                    self.render_detail(ui);
                }
            });
        });
    }
}

fn format_size(bytes: i64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    let bytes = bytes.max(0) as u64;
    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

/// Two decimals like the page it replaces; "n/a" until the first vote lands.
fn format_rating(avg: Option<f64>, count: i64) -> String {
    match avg {
        Some(avg) => format!("{avg:.2} ({count} votes)"),
        None => format!("n/a ({count} votes)"),
    }
}

// The backend emits naive-UTC isoformat timestamps, without an offset.
fn format_timestamp(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
        })
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|_| ts.to_string())
}

#[cfg(test)]
mod format_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn size_scales_through_units() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(734_003_200), "700.00 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
        assert_eq!(format_size(-1), "0 bytes");
    }

    #[test]
    fn rating_shows_two_decimals_or_placeholder() {
        assert_eq!(format_rating(Some(4.266), 3), "4.27 (3 votes)");
        assert_eq!(format_rating(None, 0), "n/a (0 votes)");
    }

    #[test]
    fn timestamp_accepts_naive_isoformat() {
        assert_eq!(
            format_timestamp("2024-05-01T12:30:00.123456"),
            "2024-05-01 12:30 UTC"
        );
        assert_eq!(
            format_timestamp("2024-05-01T12:30:00+00:00"),
            "2024-05-01 12:30 UTC"
        );
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
