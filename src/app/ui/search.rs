use eframe::egui::{self, Color32, RichText};

use crate::models::{SortField, SortOrder};

use super::super::{format_size, TorridApp};

impl TorridApp {
    pub(crate) fn render_search(&mut self, ui: &mut egui::Ui) {
        let mut should_search = false;

        ui.heading("Search torrents");
        ui.horizontal(|ui| {
            ui.label("Title");
            ui.text_edit_singleline(&mut self.search_query.title);
            ui.label("Description");
            ui.text_edit_singleline(&mut self.search_query.description);
            ui.label("Category");
            ui.text_edit_singleline(&mut self.search_query.category);
        });
        ui.horizontal(|ui| {
            ui.label("Sort by");
            egui::ComboBox::from_id_salt("sort_field")
                .selected_text(self.search_query.sort.label())
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.search_query.sort,
                        SortField::Date,
                        SortField::Date.label(),
                    );
                    ui.selectable_value(
                        &mut self.search_query.sort,
                        SortField::Size,
                        SortField::Size.label(),
                    );
                });
            egui::ComboBox::from_id_salt("sort_order")
                .selected_text(self.search_query.order.label())
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.search_query.order,
                        SortOrder::Desc,
                        SortOrder::Desc.label(),
                    );
                    ui.selectable_value(
                        &mut self.search_query.order,
                        SortOrder::Asc,
                        SortOrder::Asc.label(),
                    );
                });
            if ui.button("Search").clicked() {
                should_search = true;
            }
            if self.results_loading {
                ui.add(egui::Spinner::new());
            }
        });

        if should_search {
            self.spawn_search();
        }

        ui.add_space(8.0);
        if let Some(err) = &self.results_error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }
        if self.results.is_empty() && !self.results_loading {
            ui.label("No torrents found.");
            return;
        }

        let mut torrent_to_open: Option<String> = None;

        for torrent in &self.results {
            egui::Frame::group(ui.style())
                .fill(ui.visuals().extreme_bg_color)
                .inner_margin(egui::vec2(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    if ui
                        .button(RichText::new(&torrent.title).strong())
                        .clicked()
                    {
                        torrent_to_open = Some(torrent.id.clone());
                    }
                    if let Some(description) = &torrent.description {
                        if !description.is_empty() {
                            ui.label(description);
                        }
                    }
                    ui.horizontal(|ui| {
                        ui.label(format_size(torrent.size_bytes));
                        if !torrent.categories.is_empty() {
                            ui.label(RichText::new(torrent.categories.join(", ")).weak());
                        }
                    });
                });
            ui.add_space(8.0);
        }

        if let Some(torrent_id) = torrent_to_open {
            self.open_torrent(&torrent_id);
        }
    }
}
