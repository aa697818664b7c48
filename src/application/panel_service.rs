// Panel service - Use case for turning frames and panel options into a renderable view
use crate::application::color_resolver::ColorResolver;
use crate::application::display_processor::DisplayProcessor;
use crate::application::expression::evaluate_math_expression;
use crate::application::gauge::{build_gauge, GaugeInput};
use crate::application::panel_repository::PanelRepository;
use crate::application::series_reducer::{build_series_from_frame, reduce_series};
use crate::application::sparkline::build_sparkline;
use crate::application::table_extractor::{extract_table_value, is_table_frame, upgrade_table_column, NO_VALUE};
use crate::domain::frame::DataFrame;
use crate::domain::options::{parse_font_scale, FieldConfig, PanelOptions};
use crate::domain::panel::{Panel, PanelValueResult, PanelView, RenderRequest, SparklineView, ValueSource};
use crate::domain::series::{FlotPair, ProcessedSeries, SeriesValue, ValueName};
use crate::infrastructure::config::interpolate_variables;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("panel {0} not found")]
    NotFound(String),
    #[error("panel repository error: {0}")]
    Repository(#[from] anyhow::Error),
}

/// How the incoming frames are read: decided once from the first frame
#[derive(Debug, Clone, Copy)]
pub enum PanelMode<'a> {
    Table(&'a DataFrame),
    TimeSeries(&'a [DataFrame]),
}

impl<'a> PanelMode<'a> {
    pub fn detect(frames: &'a [DataFrame]) -> Option<Self> {
        let first = frames.first()?;
        if is_table_frame(first) {
            Some(PanelMode::Table(first))
        } else {
            Some(PanelMode::TimeSeries(frames))
        }
    }
}

/// Value picked from the data before display formatting
struct PickedValue {
    source: ValueSource,
    numeric: Option<f64>,
    text: String,
    /// Text is final and must not go through the display processor
    preformatted: bool,
    series_name: String,
    sparkline_pairs: Vec<FlotPair>,
}

#[derive(Clone)]
pub struct PanelService {
    repository: Arc<dyn PanelRepository>,
    display: Arc<dyn DisplayProcessor>,
    colors: Arc<dyn ColorResolver>,
}

impl PanelService {
    pub fn new(
        repository: Arc<dyn PanelRepository>,
        display: Arc<dyn DisplayProcessor>,
        colors: Arc<dyn ColorResolver>,
    ) -> Self {
        Self {
            repository,
            display,
            colors,
        }
    }

    pub async fn list_panels(&self) -> Result<Vec<Panel>, PanelError> {
        Ok(self.repository.list_panels().await?)
    }

    pub async fn get_panel(&self, id: &str) -> Result<Panel, PanelError> {
        self.repository
            .get_panel(id)
            .await?
            .ok_or_else(|| PanelError::NotFound(id.to_string()))
    }

    /// Render a stored panel. In table mode without a configured column the
    /// auto-selected column is written back to the repository first.
    pub async fn render_stored(&self, id: &str, request: &RenderRequest) -> Result<Option<PanelView>, PanelError> {
        let mut panel = self.get_panel(id).await?;

        if let Some(PanelMode::Table(frame)) = PanelMode::detect(&request.frames) {
            if let Some(upgraded) = upgrade_table_column(&panel.options, frame) {
                tracing::info!(
                    "Persisting table column {:?} for panel {}",
                    upgraded.table_column,
                    id
                );
                self.repository.save_options(id, upgraded.clone()).await?;
                panel.options = upgraded;
            }
        }

        Ok(self.render(&panel.options, &panel.field_config, request))
    }

    /// Full view for one cell: value, colors, prefix/postfix and geometry.
    /// `None` when there is nothing to show.
    pub fn render(&self, options: &PanelOptions, field_config: &FieldConfig, request: &RenderRequest) -> Option<PanelView> {
        let value = self.panel_value(&request.frames, options, field_config, request.time_zone.as_deref())?;

        let vars = HashMap::from([("__name".to_string(), value.series_name.clone())]);
        let prefix = interpolate_variables(&options.prefix, &vars);
        let postfix = interpolate_variables(&options.postfix, &vars);

        let background_color = if !options.color_background {
            None
        } else if value.numeric.is_none() {
            Some(self.colors.resolve(&options.value_mapping_color_background))
        } else {
            value.color.clone()
        };
        let value_color = if options.color_value && !value.text.is_empty() {
            value.color.clone()
        } else {
            None
        };

        let gauge = if options.gauge.show {
            build_gauge(&GaugeInput {
                width: request.width,
                height: request.height,
                min: options.gauge.min_value,
                max: options.gauge.max_value,
                value: value.numeric,
                thresholds: &value.thresholds,
                show_markers: options.gauge.threshold_markers,
                show_labels: options.gauge.threshold_labels,
                font_scale: parse_font_scale(&options.value_font_size),
            })
        } else {
            None
        };

        let sparkline = if options.sparkline.show && !value.sparkline_pairs.is_empty() {
            build_sparkline(
                &value.sparkline_pairs,
                request.width,
                request.height,
                options.sparkline.full,
            )
            .map(|geometry| SparklineView {
                geometry,
                line_color: self.colors.resolve(&options.sparkline.line_color),
                fill_color: self.colors.resolve(&options.sparkline.fill_color),
            })
        } else {
            None
        };

        Some(PanelView {
            prefix,
            postfix,
            prefix_font_size: options.prefix_font_size.clone(),
            postfix_font_size: options.postfix_font_size.clone(),
            value_font_size: options.value_font_size.clone(),
            background_color,
            value_color,
            circle_diameter: options
                .circle_background
                .then(|| request.width.min(request.height)),
            gauge,
            sparkline,
            value,
        })
    }

    /// Reduce the frames to one formatted, colored value
    pub fn panel_value(
        &self,
        frames: &[DataFrame],
        options: &PanelOptions,
        field_config: &FieldConfig,
        time_zone: Option<&str>,
    ) -> Option<PanelValueResult> {
        let picked = match PanelMode::detect(frames)? {
            PanelMode::Table(frame) => {
                let table = extract_table_value(frame, options.table_column.as_deref());
                PickedValue {
                    source: ValueSource::Table,
                    numeric: table.numeric,
                    text: table.text,
                    preformatted: false,
                    series_name: table.column.unwrap_or_default(),
                    sparkline_pairs: Vec::new(),
                }
            }
            PanelMode::TimeSeries(frames) => self.time_series_value(frames, options, time_zone)?,
        };

        let (text, numeric) = match picked.numeric {
            Some(raw) if !picked.preformatted => {
                let display = self.display.display(raw, field_config);
                (display.text, display.numeric.or(Some(raw)))
            }
            numeric => {
                let mapped = (picked.text.is_empty() || picked.text == NO_VALUE)
                    .then(|| self.display.null_text(field_config))
                    .flatten();
                (mapped.unwrap_or(picked.text), numeric)
            }
        };

        let thresholds = field_config.thresholds_or_default();
        let color = numeric
            .and_then(|v| thresholds.active_color(v))
            .map(|name| self.colors.resolve(name));

        Some(PanelValueResult {
            source: picked.source,
            text,
            numeric,
            color,
            series_name: picked.series_name,
            sparkline_pairs: picked.sparkline_pairs,
            thresholds: thresholds.resolve_steps(|name| self.colors.resolve(name)),
        })
    }

    fn time_series_value(
        &self,
        frames: &[DataFrame],
        options: &PanelOptions,
        time_zone: Option<&str>,
    ) -> Option<PickedValue> {
        let processed: Vec<ProcessedSeries> = frames
            .iter()
            .enumerate()
            .filter_map(|(i, frame)| build_series_from_frame(frame, frame.alias(i)))
            .map(|raw| reduce_series(&raw, options.null_point_mode))
            .collect();

        let first = processed.first()?;
        let mut numeric = None;
        let mut text = String::new();
        let mut preformatted = false;

        match (options.value_name, &first.last_value) {
            (ValueName::Name, _) => text = first.alias.clone(),
            (_, Some(SeriesValue::Text(last))) => text = last.clone(),
            (ValueName::LastTime, _) => {
                preformatted = true;
                match first.last_time {
                    Some(timestamp) => {
                        numeric = Some(timestamp as f64);
                        text = self.display.format_time(timestamp, time_zone);
                    }
                    None => text = NO_VALUE.to_string(),
                }
            }
            (value_name, _) if !options.math.trim().is_empty() => {
                let result = evaluate_math_expression(&options.math, &processed, value_name);
                if result.is_none() {
                    tracing::debug!("Math expression {:?} gave no value, using 0", options.math);
                }
                numeric = Some(result.unwrap_or(0.0));
            }
            (value_name, _) => numeric = first.stats.value(value_name),
        }

        Some(PickedValue {
            source: ValueSource::TimeSeries,
            numeric,
            text,
            preformatted,
            series_name: first.alias.clone(),
            sparkline_pairs: first.flotpairs.clone(),
        })
    }
}
