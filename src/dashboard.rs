//! Built-in dashboard page used when no template is supplied.

use crate::page::Page;

const TOTAL_SLOT: &str = "%%TOTAL%%";
const NETWORK_SLOT: &str = "%%NETWORK%%";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>IUS-DIGITALIS Dashboard</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Courier New', monospace;
            background: linear-gradient(135deg, #0a0e27 0%, #1a1f3a 100%);
            color: #00ff41;
            padding: 40px 20px;
            min-height: 100vh;
        }
        .container { max-width: 1200px; margin: 0 auto; }
        .header {
            text-align: center;
            border: 3px solid #00ff41;
            padding: 30px;
            margin-bottom: 40px;
            background: rgba(26, 31, 58, 0.8);
            box-shadow: 0 0 30px rgba(0, 255, 65, 0.3);
        }
        h1 { font-size: 2.5em; margin-bottom: 10px; }
        .subtitle { font-size: 1.2em; color: #4ecdc4; }
        .stats {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
            gap: 20px;
            margin-bottom: 40px;
        }
        .stat-card {
            background: #1a1f3a;
            border: 2px solid #00ff41;
            padding: 25px;
            border-radius: 10px;
            text-align: center;
        }
        .stat-number { font-size: 3em; font-weight: bold; color: #ff6b35; margin: 10px 0; }
        .stat-label { font-size: 1.1em; color: #4ecdc4; }
        .section-title {
            font-size: 1.8em;
            margin: 30px 0 20px;
            padding-bottom: 10px;
            border-bottom: 2px solid #00ff41;
        }
        .transaction {
            background: #0f1729;
            border-left: 5px solid #00ff41;
            padding: 25px;
            margin: 20px 0;
            border-radius: 5px;
        }
        .tx-row { margin: 8px 0; padding: 5px 0; }
        .tx-label { color: #00ff41; font-weight: bold; display: inline-block; width: 120px; }
        .tx-value { color: #ffffff; }
        .hash {
            color: #ff6b35;
            font-size: 0.9em;
            word-break: break-all;
            font-family: 'Monaco', 'Courier New', monospace;
        }
        .footer {
            text-align: center;
            margin-top: 50px;
            padding: 20px;
            color: #4ecdc4;
            border-top: 2px solid #00ff41;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>⛓️ IUS-DIGITALIS BLOCKCHAIN REGISTRY</h1>
            <p class="subtitle">Sistema de Verificación de Integridad Documental</p>
        </div>

        <div class="stats">
            <div class="stat-card">
                <div class="stat-label">📄 Documentos Procesados</div>
                <div class="stat-number">%%TOTAL%%</div>
            </div>
            <div class="stat-card">
                <div class="stat-label">⛓️ Transacciones Ancladas</div>
                <div class="stat-number">%%TOTAL%%</div>
            </div>
        </div>

        <h2 class="section-title">Anclajes Blockchain</h2>

        <div id="transactions"></div>

        <div class="footer">
            <p>🏛️ IUS-DIGITALIS | Sistema de Gestión Documental con Blockchain</p>
            <p style="margin-top: 10px; font-size: 0.9em;">Network: %%NETWORK%%</p>
        </div>
    </div>
</body>
</html>
"#;

/// Dashboard page with stat cards filled in. `total` is `None` when the anchors could not be
/// loaded; the stat cards then show a dash.
pub fn page(total: Option<u64>, network_label: &str) -> Page {
    let total = total.map_or_else(|| "—".to_string(), |t| t.to_string());
    Page::new(
        &TEMPLATE
            .replace(TOTAL_SLOT, &total)
            .replace(NETWORK_SLOT, network_label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_slots() {
        let html = page(Some(12), "polygon-testnet").to_html().unwrap();
        assert_eq!(html.matches(">12<").count(), 2);
        assert!(html.contains("Network: polygon-testnet"));
        assert!(!html.contains("%%"));
    }

    #[test]
    fn has_empty_transactions_container() {
        let p = page(None, "x");
        let el = p.find_by_id("transactions").unwrap();
        assert_eq!(p.inner_html(&el).unwrap(), "");
        assert!(p.body().is_some());
        assert!(p.to_html().unwrap().contains(">—<"));
    }
}
