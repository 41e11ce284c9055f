use eframe::egui::{self, Color32, RichText};

use super::super::{format_rating, format_size, format_timestamp, TorridApp};

impl TorridApp {
    pub(crate) fn render_detail(&mut self, ui: &mut egui::Ui) {
        let mut download_id: Option<String> = None;
        let mut should_submit_comment = false;

        let Some(detail) = self.detail.as_mut() else {
            return;
        };

        ui.heading("Torrent detail");
        if detail.loading && detail.torrent.is_none() {
            ui.add(egui::Spinner::new());
        }
        if let Some(err) = &detail.error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }
        if let Some(torrent) = &detail.torrent {
            ui.label(RichText::new(&torrent.title).strong().size(18.0));
            if let Some(description) = &torrent.description {
                if !description.is_empty() {
                    ui.label(description);
                }
            }
            ui.label(format!("Size: {}", format_size(torrent.size_bytes)));
            if !torrent.categories.is_empty() {
                ui.label(format!("Categories: {}", torrent.categories.join(", ")));
            }
            ui.label(format!(
                "Average rating: {}",
                format_rating(torrent.rating_avg, torrent.rating_count)
            ));
            if ui.button("Download torrent").clicked() {
                download_id = Some(torrent.id.clone());
            }
        }

        ui.add_space(10.0);
        ui.label(RichText::new("Comments").heading());
        if detail.comments_loading {
            ui.add(egui::Spinner::new());
        }
        if let Some(err) = &detail.comments_error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }
        if detail.comments.is_empty() && !detail.comments_loading {
            ui.label("No comments yet.");
        }
        for comment in &detail.comments {
            egui::Frame::group(ui.style())
                .inner_margin(egui::vec2(10.0, 6.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(&comment.text);
                    let when = comment
                        .created_at
                        .as_deref()
                        .map(format_timestamp)
                        .unwrap_or_default();
                    ui.label(
                        RichText::new(format!(
                            "Rating: {} | by {} | {when}",
                            comment.rating, comment.user_id
                        ))
                        .small()
                        .weak(),
                    );
                });
            ui.add_space(4.0);
        }

        ui.add_space(8.0);
        ui.label("Add a comment");
        ui.add(
            egui::TextEdit::multiline(&mut detail.comment_form.text)
                .desired_rows(3)
                .hint_text("What did you think of this torrent?"),
        );
        ui.horizontal(|ui| {
            ui.label("Rating");
            ui.add(egui::Slider::new(&mut detail.comment_form.rating, 1..=5));
            if detail.comment_form.sending {
                ui.add(egui::Spinner::new());
            } else if ui.button("Submit").clicked() {
                should_submit_comment = true;
            }
        });
        if let Some(err) = &detail.comment_form.error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }
        if let Some(notice) = &detail.comment_form.notice {
            ui.label(notice);
        }

        if let Some(torrent_id) = download_id {
            self.spawn_download(torrent_id);
        }
        if should_submit_comment {
            self.spawn_submit_comment();
        }
    }
}
