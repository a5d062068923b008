use crate::{datefmt::DateFormatter, model::Anchor};

pub const CARD_CLASS: &str = "transaction";
pub const PLACEHOLDER_CLASS: &str = "board-placeholder";
pub const NO_DATA_TEXT: &str = "Sin datos de transacciones";
pub const DEFAULT_CONTAINER_ID: &str = "transactions";
pub const DEFAULT_RESULTS_ID: &str = "results";
pub const SHOW_CLASS: &str = "show";

#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub dates: DateFormatter,
    pub container_id: String,
    pub results_id: String,
    /// Name shown in the "load failed" placeholder, usually the resource file name.
    pub source_label: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            dates: DateFormatter::default(),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            results_id: DEFAULT_RESULTS_ID.to_string(),
            source_label: "anchors.json".to_string(),
        }
    }
}

/// One card. `index` is 0-based; the heading shows it 1-based.
///
/// Field values are interpolated as-is.
pub fn render_card(index: usize, anchor: &Anchor, dates: &DateFormatter) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str("\n<div class=\"");
    out.push_str(CARD_CLASS);
    out.push_str("\">\n");
    out.push_str(&format!(
        "  <h3 style=\"color:#4ecdc4;margin-bottom:15px;\">📄 Transacción #{}</h3>\n",
        index + 1
    ));
    push_row(&mut out, "Expediente:", "tx-value", &anchor.expediente_id);
    push_row(&mut out, "Categoría:", "tx-value", &anchor.categoria);
    push_row(&mut out, "SHA-256:", "hash", &anchor.sha256);
    push_row(&mut out, "TX ID:", "hash", &anchor.txid);
    push_row(&mut out, "Network:", "tx-value", &anchor.network);
    if let Some(status) = &anchor.status {
        push_row(&mut out, "Estado:", "tx-value", status);
    }
    out.push_str(&format!(
        "  <div class=\"tx-row\"><span class=\"tx-label\">Timestamp:</span>\
         <span class=\"tx-value\" style=\"color:#4ecdc4;\">{}</span></div>\n",
        dates.format(anchor.timestamp)
    ));
    out.push_str("</div>\n");
    out
}

fn push_row(out: &mut String, label: &str, value_class: &str, value: &str) {
    out.push_str(&format!(
        "  <div class=\"tx-row\"><span class=\"tx-label\">{label}</span>\
         <span class=\"{value_class}\">{value}</span></div>\n"
    ));
}

pub fn render_cards(anchors: &[Anchor], dates: &DateFormatter) -> String {
    anchors
        .iter()
        .enumerate()
        .map(|(i, a)| render_card(i, a, dates))
        .collect()
}

pub fn no_data_placeholder() -> String {
    placeholder(NO_DATA_TEXT)
}

pub fn load_failed_placeholder(source_label: &str) -> String {
    placeholder(&format!("No se pudo cargar {source_label}"))
}

fn placeholder(text: &str) -> String {
    format!("<div class=\"{PLACEHOLDER_CLASS}\" style=\"color:#f55\">{text}</div>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(id: &str, ts: i64) -> Anchor {
        Anchor {
            expediente_id: id.to_string(),
            categoria: "laboral".to_string(),
            sha256: "9f86d081884c7d65".to_string(),
            txid: "0xabc".to_string(),
            network: "polygon-testnet".to_string(),
            timestamp: ts,
            status: None,
        }
    }

    #[test]
    fn card_shows_every_field() {
        let card = render_card(0, &anchor("EXP-7", 0), &DateFormatter::default());
        assert!(card.contains("Transacción #1"));
        assert!(card.contains(">EXP-7<"));
        assert!(card.contains(">laboral<"));
        assert!(card.contains("<span class=\"hash\">9f86d081884c7d65</span>"));
        assert!(card.contains("<span class=\"hash\">0xabc</span>"));
        assert!(card.contains(">polygon-testnet<"));
        assert!(card.contains(">1/1/1970, 0:00:00<"));
        assert!(!card.contains("Estado:"));
    }

    #[test]
    fn status_row_only_when_present() {
        let mut a = anchor("EXP-7", 0);
        a.status = Some("CONFIRMED".to_string());
        let card = render_card(0, &a, &DateFormatter::default());
        assert!(card.contains("Estado:"));
        assert!(card.contains(">CONFIRMED<"));
    }

    #[test]
    fn cards_keep_input_order() {
        let anchors = vec![anchor("A", 0), anchor("B", 1), anchor("C", 2)];
        let html = render_cards(&anchors, &DateFormatter::default());
        assert_eq!(html.matches("class=\"transaction\"").count(), 3);
        let a = html.find(">A<").unwrap();
        let b = html.find(">B<").unwrap();
        let c = html.find(">C<").unwrap();
        assert!(a < b && b < c);
        assert!(html.contains("Transacción #3"));
    }

    #[test]
    fn placeholders() {
        assert!(no_data_placeholder().contains(NO_DATA_TEXT));
        assert!(load_failed_placeholder("anchors.json").contains("No se pudo cargar anchors.json"));
        assert!(render_cards(&[], &DateFormatter::default()).is_empty());
    }
}
