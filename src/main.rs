use campaign_wizard::config::AppConfig;
use campaign_wizard::core::campaign::map_wizard::{self, MapBuildData};
use campaign_wizard::core::campaign::variant_wizard::{self, VariantData};
use campaign_wizard::core::campaign::{CreatureSummary, CreatureTemplate, LibraryRef, RoleType};
use campaign_wizard::core::logging;
use campaign_wizard::core::wizard::{run_with_policy, Completion, WizardDefinition, WizardError};
use campaign_wizard::tui::TerminalHost;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();
    let _log_guard = logging::init_tui(&config.log_dir());
    log::info!("{} v{} starting", campaign_wizard::NAME, campaign_wizard::VERSION);

    let wizard = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.host.default_wizard.clone());

    let output = match wizard.as_str() {
        "map" => {
            let definition = map_wizard::definition(MapBuildData::default(), sample_libraries());
            run_in_terminal(definition, &config)?
                .into_context()
                .map(|data| serde_json::to_string_pretty(&data))
                .transpose()?
        }
        "variant" => {
            let definition = variant_wizard::definition(
                VariantData::default(),
                sample_creatures(),
                sample_templates(),
            );
            run_in_terminal(definition, &config)?
                .into_context()
                .and_then(|data| data.to_variant())
                .map(|variant| serde_json::to_string_pretty(&variant))
                .transpose()?
        }
        other => {
            eprintln!("Unknown wizard '{other}' (expected 'map' or 'variant')");
            std::process::exit(2);
        }
    };

    match output {
        Some(json) => println!("{json}"),
        None => println!("cancelled"),
    }

    Ok(())
}

/// Run a wizard with the terminal in raw mode, restoring it afterwards even
/// when the run fails.
fn run_in_terminal<C>(
    definition: WizardDefinition<C>,
    config: &AppConfig,
) -> Result<Completion<C>, WizardError> {
    let mut host = TerminalHost::enter(config.host.tick_rate())?;
    let result = run_with_policy(definition, &mut host, config.navigation.policy());
    host.leave()?;

    if let Err(e) = &result {
        log::error!("Wizard run failed: {e}");
    }
    result
}

fn sample_libraries() -> Vec<LibraryRef> {
    vec![
        LibraryRef::new("Dungeon Tiles"),
        LibraryRef::new("Caverns & Grottos"),
        LibraryRef::new("Ruined Keep"),
    ]
}

fn sample_creatures() -> Vec<CreatureSummary> {
    vec![
        CreatureSummary::new("Goblin Blackblade", 1, RoleType::Lurker),
        CreatureSummary::new("Goblin Cutter", 1, RoleType::Skirmisher).minion(),
        CreatureSummary::new("Orc Raider", 3, RoleType::Skirmisher),
        CreatureSummary::new("Ogre Bludgeoneer", 8, RoleType::Brute),
    ]
}

fn sample_templates() -> Vec<CreatureTemplate> {
    vec![
        CreatureTemplate::new("Battle Champion", RoleType::Soldier),
        CreatureTemplate::new("Frost", RoleType::Brute),
        CreatureTemplate::new("Sniper", RoleType::Artillery),
        CreatureTemplate::new("Shadowborn", RoleType::Lurker),
    ]
}
