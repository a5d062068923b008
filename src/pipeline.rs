use crate::{
    dashboard,
    error::BoardResult,
    model::AnchorDocument,
    page::{Element, Page},
    render::{
        RenderSettings, SHOW_CLASS, load_failed_placeholder, no_data_placeholder, render_cards,
    },
    source::AnchorSource,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Cards(usize),
    NoData,
    LoadFailed,
}

#[derive(Clone, Debug)]
pub enum PageTemplate {
    /// The built-in dashboard; the label goes in its footer.
    Dashboard { network_label: String },
    Custom(String),
}

#[derive(Clone, Debug)]
pub struct RenderedPage {
    pub html: String,
    pub outcome: RenderOutcome,
}

/// One uncached read of the source, parsed as a whole.
#[tracing::instrument(skip(source), fields(source = %source))]
pub async fn load_document(source: &AnchorSource) -> BoardResult<AnchorDocument> {
    let bytes = source.read().await?;
    AnchorDocument::from_slice(&bytes)
}

/// Apply a load result to the page.
///
/// Cards go into `#container_id`, falling back to the results element (`#results_id`, else
/// `<body>`). A failed load appends a single placeholder to `#container_id` or `<body>` and
/// leaves everything else alone.
pub fn inject(
    page: &mut Page,
    loaded: &BoardResult<AnchorDocument>,
    settings: &RenderSettings,
) -> RenderOutcome {
    let doc = match loaded {
        Ok(doc) => doc,
        Err(err) => {
            tracing::error!(error = %err, source = %settings.source_label, "failed to load anchors");
            let target = page.find_by_id_or_body(&settings.container_id);
            page.insert_before_end(&target, &load_failed_placeholder(&settings.source_label));
            return RenderOutcome::LoadFailed;
        }
    };

    let container = locate_container(page, settings);
    if doc.is_empty() {
        page.set_inner_html(&container, &no_data_placeholder());
        return RenderOutcome::NoData;
    }

    let anchors = doc.anchors();
    page.set_inner_html(&container, &render_cards(anchors, &settings.dates));

    let results = locate_results(page, settings);
    page.add_class(&results, SHOW_CLASS);

    RenderOutcome::Cards(anchors.len())
}

fn locate_results(page: &Page, settings: &RenderSettings) -> Element {
    page.find_by_id_or_body(&settings.results_id)
}

fn locate_container(page: &Page, settings: &RenderSettings) -> Element {
    page.find_by_id(&settings.container_id)
        .unwrap_or_else(|| locate_results(page, settings))
}

pub async fn render_page(
    source: &AnchorSource,
    template: PageTemplate,
    settings: &RenderSettings,
) -> BoardResult<RenderedPage> {
    let loaded = load_document(source).await;

    let mut page = match template {
        PageTemplate::Dashboard { network_label } => dashboard::page(
            loaded.as_ref().ok().map(AnchorDocument::total),
            &network_label,
        ),
        PageTemplate::Custom(html) => Page::new(&html),
    };

    let outcome = inject(&mut page, &loaded, settings);
    tracing::info!(?outcome, "page rendered");

    Ok(RenderedPage {
        html: page.to_html()?,
        outcome,
    })
}

/// The cards fragment alone. Unlike [`render_page`], a load failure is returned to the caller.
pub async fn render_cards_fragment(
    source: &AnchorSource,
    settings: &RenderSettings,
) -> BoardResult<(String, usize)> {
    let doc = load_document(source).await?;
    let anchors = doc.anchors();
    if anchors.is_empty() {
        return Ok((no_data_placeholder(), 0));
    }
    Ok((render_cards(anchors, &settings.dates), anchors.len()))
}
