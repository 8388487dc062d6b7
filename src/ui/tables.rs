use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::present::TableContent;

// ---------------------------------------------------------------------------
// Count tables (crime type / neighbourhood)
// ---------------------------------------------------------------------------

/// Render one ranked count table. In the placeholder state the header row
/// still renders over an empty body.
pub fn count_table(ui: &mut Ui, title: &str, content: &TableContent) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(title);
    });
    ui.add_space(4.0);

    // Two tables share the central panel; the title keeps their ids apart.
    ui.push_id(title, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder().at_least(140.0))
            .column(Column::auto().at_least(60.0))
            .header(20.0, |mut header| {
                for heading in content.headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(heading);
                    });
                }
            })
            .body(|mut body| {
                for row in &content.rows {
                    body.row(18.0, |mut table_row| {
                        table_row.col(|ui: &mut Ui| {
                            ui.label(&row[0]);
                        });
                        table_row.col(|ui: &mut Ui| {
                            ui.label(&row[1]);
                        });
                    });
                }
            });
    });
}
