use eframe::egui::{self, Color32};

use super::super::TorridApp;

impl TorridApp {
    pub(crate) fn render_auth(&mut self, ui: &mut egui::Ui) {
        ui.columns(2, |columns| {
            self.render_register_form(&mut columns[0]);
            self.render_login_form(&mut columns[1]);
        });
    }

    fn render_register_form(&mut self, ui: &mut egui::Ui) {
        let mut should_submit = false;

        ui.heading("Register");
        ui.label("Username");
        ui.text_edit_singleline(&mut self.register_form.username);
        ui.label("Email");
        ui.text_edit_singleline(&mut self.register_form.email);
        ui.label("Password");
        ui.add(egui::TextEdit::singleline(&mut self.register_form.password).password(true));
        ui.add_space(6.0);
        if self.register_form.submitting {
            ui.add(egui::Spinner::new());
        } else if ui.button("Register").clicked() {
            should_submit = true;
        }
        if let Some(err) = &self.register_form.error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }
        if let Some(notice) = &self.register_form.notice {
            ui.label(notice);
        }

        if should_submit {
            self.spawn_register();
        }
    }

    fn render_login_form(&mut self, ui: &mut egui::Ui) {
        let mut should_submit = false;

        ui.heading("Login");
        ui.label("Username");
        ui.text_edit_singleline(&mut self.login_form.username);
        ui.label("Password");
        ui.add(egui::TextEdit::singleline(&mut self.login_form.password).password(true));
        ui.add_space(6.0);
        if self.login_form.submitting {
            ui.add(egui::Spinner::new());
        } else if ui.button("Log in").clicked() {
            should_submit = true;
        }
        if let Some(err) = &self.login_form.error {
            ui.colored_label(Color32::LIGHT_RED, err);
        }
        if let Some(notice) = &self.login_form.notice {
            ui.label(notice);
        }

        if should_submit {
            self.spawn_login();
        }
    }
}
