//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use canvas_composer::{
    BasicCssParser, Collaborators, Composer, ComposerConfig, CssParser, LoadOutcome,
};
use canvas_model::{CssRule, Selector, StoredPayload};
use canvas_persistence::FileStorage;
use tracing::{info, info_span};

use crate::cli::{AddArgs, ImportArgs, StorageArgs};

/// One row of the `list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSummary {
    pub selectors: String,
    pub state: String,
    pub max_width: String,
    pub properties: usize,
}

impl From<&CssRule> for RuleSummary {
    fn from(rule: &CssRule) -> Self {
        Self {
            selectors: rule.selectors.iter().map(ToString::to_string).collect(),
            state: rule.state.clone(),
            max_width: rule.max_width.clone(),
            properties: rule.style.len(),
        }
    }
}

/// What `import` changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rules read from the stylesheet.
    pub imported: usize,
    /// Rules in storage afterwards.
    pub total: usize,
}

/// Open the composer over a storage file, loading what it holds.
pub fn open_composer(path: &Path) -> Result<Composer> {
    let storage = FileStorage::new(path);
    Composer::init(
        ComposerConfig::default(),
        Collaborators::new().with_storage(storage),
    )
    .with_context(|| format!("load rules from {}", path.display()))
}

pub fn run_list(args: &StorageArgs) -> Result<Vec<RuleSummary>> {
    let composer = open_composer(&args.file)?;
    Ok(composer.get_all().iter().map(RuleSummary::from).collect())
}

pub fn run_render(args: &StorageArgs) -> Result<String> {
    let composer = open_composer(&args.file)?;
    Ok(composer.render())
}

pub fn run_add(args: &AddArgs) -> Result<RuleSummary> {
    let selectors = Selector::parse_all(&args.selectors).context("parse selectors")?;
    let declarations = args
        .styles
        .iter()
        .map(String::as_str)
        .map(parse_declaration)
        .collect::<Result<Vec<_>>>()?;

    let mut composer = open_composer(&args.storage.file)?;
    let rule = composer.add(&selectors, args.state.as_deref(), args.width.as_deref());
    for (property, value) in declarations {
        rule.set_style(property, value);
    }
    let summary = RuleSummary::from(&*rule);
    composer.record_change();

    persist(&mut composer, &args.storage.file)?;
    info!(selectors = %summary.selectors, properties = summary.properties, "Rule saved");
    Ok(summary)
}

pub fn run_import(args: &ImportArgs) -> Result<ImportSummary> {
    let span = info_span!("import", css = %args.css.display());
    let _guard = span.enter();

    let css = fs::read_to_string(&args.css)
        .with_context(|| format!("read stylesheet {}", args.css.display()))?;
    let mut composer = open_composer(&args.storage.file)?;

    let imported = if args.replace {
        let outcome = composer
            .load(Some(StoredPayload::from_css(css)))
            .with_context(|| format!("parse {}", args.css.display()))?;
        match outcome {
            LoadOutcome::Loaded { descriptors, .. } => descriptors.len(),
            LoadOutcome::Empty | LoadOutcome::Degraded { .. } => 0,
        }
    } else {
        let descriptors = BasicCssParser
            .parse_css(&css)
            .with_context(|| format!("parse {}", args.css.display()))?;
        for descriptor in &descriptors {
            let rule = composer.add(
                &descriptor.selectors,
                Some(descriptor.state.as_str()),
                Some(descriptor.max_width.as_str()),
            );
            rule.style.extend(descriptor.style.clone());
        }
        composer.record_change();
        descriptors.len()
    };

    persist(&mut composer, &args.storage.file)?;
    let total = composer.get_all().len();
    info!(imported, total, "Stylesheet imported");
    Ok(ImportSummary { imported, total })
}

/// Parse a `property=value` declaration.
pub fn parse_declaration(input: &str) -> Result<(String, String)> {
    let (property, value) = input
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid style '{input}': expected PROPERTY=VALUE"))?;
    let (property, value) = (property.trim(), value.trim());
    if property.is_empty() || value.is_empty() {
        bail!("invalid style '{input}': property and value must not be empty");
    }
    Ok((property.to_string(), value.to_string()))
}

/// Assemble the payload and write it to disk, returning write failures.
fn persist(composer: &mut Composer, path: &Path) -> Result<()> {
    let payload = composer
        .store(true)
        .context("serialize rules")?
        .ok_or_else(|| anyhow!("no storage configured"))?;
    FileStorage::new(path)
        .save(&payload)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
