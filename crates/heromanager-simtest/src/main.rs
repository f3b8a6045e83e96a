//! HeroManager Headless Simulation Harness
//!
//! Validates classifier data and generates sample heroes in-process.
//! No server, no persistence, no clock.
//!
//! Usage:
//!   cargo run -p heromanager-simtest
//!   cargo run -p heromanager-simtest -- --verbose --count 20 --seed 7
//!   cargo run -p heromanager-simtest -- --race Dwarf --race Elf --json

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use heromanager_logic::classifier::{load_classifiers, Category, ClassifierManifest};
use heromanager_logic::config::EngineConfig;
use heromanager_logic::hero::HeroGenerator;
use heromanager_logic::selector::Selector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "heromanager-simtest",
    about = "Validate HeroManager data and generate sample heroes"
)]
struct Cli {
    /// Directory holding races.json, castes.json and professions.json
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Engine config JSON; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of heroes to generate
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// RNG seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Restrict races (repeatable)
    #[arg(long = "race")]
    races: Vec<String>,

    /// Restrict castes (repeatable)
    #[arg(long = "caste")]
    castes: Vec<String>,

    /// Restrict professions (repeatable)
    #[arg(long = "profession")]
    professions: Vec<String>,

    /// Print generated heroes as JSON lines
    #[arg(long)]
    json: bool,

    /// Show passing checks as well as failures
    #[arg(long)]
    verbose: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

struct CheckResult {
    name: String,
    passed: bool,
    detail: String,
}

impl CheckResult {
    fn new(name: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    println!("=== HeroManager Simulation Harness ===\n");

    let config = load_config(cli.config.as_deref())?;
    let manifest = load_manifest(&cli.data, &config)?;

    let mut results = Vec::new();

    // 1. Manifest contents
    results.extend(validate_manifest(&manifest));

    // 2. Conflict references
    results.extend(validate_conflicts(&manifest));

    // 3. Modifiers and rarities
    results.extend(validate_classifiers(&manifest));

    // 4. Hero generation
    results.extend(generate_heroes(&cli, &config, &manifest));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || cli.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

// ── Loading ─────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = EngineConfig::from_json(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;

    log::info!("Loaded engine config from {}", path.display());
    Ok(config)
}

fn load_manifest(dir: &Path, config: &EngineConfig) -> Result<ClassifierManifest> {
    let policy = config.attribute_policy();
    let mut manifest = ClassifierManifest::new();

    for category in Category::all() {
        let path = dir.join(format!("{}.json", category.plural()));
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        load_classifiers(*category, &text, &policy, &mut manifest)
            .with_context(|| format!("loading {}", path.display()))?;
    }

    Ok(manifest)
}

// ── 1. Manifest ─────────────────────────────────────────────────────────

fn validate_manifest(manifest: &ClassifierManifest) -> Vec<CheckResult> {
    println!("--- Manifest ---");

    Category::all()
        .iter()
        .map(|category| {
            let count = manifest.len(*category);
            CheckResult::new(
                format!("manifest_has_{}", category.plural()),
                count > 0,
                format!("{} {} loaded", count, category.plural()),
            )
        })
        .collect()
}

// ── 2. Conflicts ────────────────────────────────────────────────────────

fn validate_conflicts(manifest: &ClassifierManifest) -> Vec<CheckResult> {
    println!("--- Conflicts ---");
    let mut results = Vec::new();

    // Every conflict target names a registered classifier
    let mut dangling = Vec::new();
    for category in Category::all() {
        for id in manifest.all(*category) {
            let Some(classifier) = manifest.resolve(*category, id) else {
                continue;
            };
            for other in category.others() {
                for target in classifier.conflicts.excluded(other) {
                    if manifest.resolve(other, target).is_none() {
                        dangling.push(format!("{} {} -> {} {}", category, id, other, target));
                    }
                }
            }
        }
    }
    results.push(CheckResult::new(
        "conflict_targets_resolve",
        dangling.is_empty(),
        if dangling.is_empty() {
            "all conflict targets are registered".to_string()
        } else {
            format!("unknown targets: {}", dangling.join(", "))
        },
    ));

    // Each option on its own must leave something in the other categories
    let mut dead_ends = Vec::new();
    for category in Category::all() {
        for id in manifest.all(*category) {
            let selector = Selector::new(manifest).with_option(*category, id.as_str());
            for other in category.others() {
                if selector.candidates(other).is_empty() {
                    dead_ends.push(format!("{} {} leaves no {}", category, id, other));
                }
            }
        }
    }
    results.push(CheckResult::new(
        "no_dead_end_options",
        dead_ends.is_empty(),
        if dead_ends.is_empty() {
            "every option has compatible partners".to_string()
        } else {
            dead_ends.join(", ")
        },
    ));

    results
}

// ── 3. Classifiers ──────────────────────────────────────────────────────

fn validate_classifiers(manifest: &ClassifierManifest) -> Vec<CheckResult> {
    println!("--- Classifiers ---");
    let mut bad_rarity = Vec::new();
    let mut bad_factor = Vec::new();

    for category in Category::all() {
        for id in manifest.all(*category) {
            let Some(classifier) = manifest.resolve(*category, id) else {
                continue;
            };
            if let Some(rarity) = classifier.rarity {
                if !rarity.is_finite() || rarity < 0.0 {
                    bad_rarity.push(format!("{} {} ({})", category, id, rarity));
                }
            }
            for (key, _) in classifier.attributes.iter() {
                let factor = classifier.attributes.factor(key);
                if factor < 0.0 {
                    bad_factor.push(format!("{} {} {} ({:.2})", category, id, key, factor));
                }
            }
        }
    }

    vec![
        CheckResult::new(
            "rarities_non_negative",
            bad_rarity.is_empty(),
            if bad_rarity.is_empty() {
                "all rarities usable as weights".to_string()
            } else {
                bad_rarity.join(", ")
            },
        ),
        CheckResult::new(
            "factors_non_negative",
            bad_factor.is_empty(),
            if bad_factor.is_empty() {
                "no modifier flips an attribute's sign".to_string()
            } else {
                bad_factor.join(", ")
            },
        ),
    ]
}

// ── 4. Generation ───────────────────────────────────────────────────────

fn generate_heroes(
    cli: &Cli,
    config: &EngineConfig,
    manifest: &ClassifierManifest,
) -> Vec<CheckResult> {
    println!("--- Generation (seed {}, {} heroes) ---", cli.seed, cli.count);
    let mut results = Vec::new();

    let mut selector = Selector::new(manifest);
    for (category, ids) in [
        (Category::Race, &cli.races),
        (Category::Caste, &cli.castes),
        (Category::Profession, &cli.professions),
    ] {
        for id in ids {
            selector.add_option(category, id.as_str());
        }
    }

    let generator = HeroGenerator::from_config(config);
    let mut rng = StdRng::seed_from_u64(cli.seed);
    let mut heroes = Vec::with_capacity(cli.count);

    for i in 0..cli.count {
        match generator.generate(&selector, &mut rng) {
            Ok(hero) => heroes.push(hero),
            Err(e) => {
                results.push(CheckResult::new(
                    "generate",
                    false,
                    format!("hero {} failed: {}", i, e),
                ));
                return results;
            }
        }
    }

    for hero in &heroes {
        if cli.json {
            match serde_json::to_string(hero) {
                Ok(line) => println!("{}", line),
                Err(e) => log::warn!("Could not serialize hero: {}", e),
            }
        } else {
            let stats = hero
                .attributes
                .iter()
                .map(|(k, v)| format!("{} {:>5.1}", k, v))
                .collect::<Vec<_>>()
                .join("  ");
            println!(
                "  {:<8} {:<8} {:<10} {}",
                hero.race, hero.caste, hero.profession, stats
            );
        }
    }

    results.push(CheckResult::new(
        "generate",
        heroes.len() == cli.count,
        format!("{} heroes generated", heroes.len()),
    ));

    // Picks stay inside the filtered option sets
    let races = selector.selectable(Category::Race);
    let castes = selector.selectable(Category::Caste);
    let professions = selector.selectable(Category::Profession);
    let stray = heroes
        .iter()
        .filter(|h| {
            !races.contains(&h.race)
                || !castes.contains(&h.caste)
                || !professions.contains(&h.profession)
        })
        .count();
    results.push(CheckResult::new(
        "picks_within_selectable",
        stray == 0,
        format!("{} heroes outside the selectable sets", stray),
    ));

    // Attributes stay within configured bounds
    let (min, max) = (config.attributes.min, config.attributes.max);
    let out_of_bounds = heroes
        .iter()
        .flat_map(|h| h.attributes.iter())
        .filter(|(_, v)| *v < min.min(max) || *v > max.max(min))
        .count();
    results.push(CheckResult::new(
        "attributes_in_bounds",
        out_of_bounds == 0,
        format!("{} attribute values out of [{}, {}]", out_of_bounds, min, max),
    ));

    results
}
