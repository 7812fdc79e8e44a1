use super::{LocationChoice, ResolvedConfig};

pub(super) fn print_summary(config: &ResolvedConfig) {
	println!("Effective configuration:");
	println!("  Provider: {}", config.provider.base_url);
	println!(
		"  API key: {}",
		if config.has_api_key() { "set" } else { "missing" }
	);
	println!("  Libraries: {}", config.provider.libraries.join(", "));
	println!("  Timeout: {}s", config.provider.timeout.as_secs());
	println!("  Location: {}", describe_location(&config.location));
	println!("  Fallback: {}", config.fallback);
	println!("  Zoom: {}", config.zoom);
	println!(
		"  Autocomplete debounce: {}ms",
		config.autocomplete_debounce.as_millis()
	);
	println!(
		"  UI theme: {}",
		config.theme.as_deref().unwrap_or("(use the library default)")
	);
	if let Some(title) = &config.input_title {
		println!("  Prompt placeholder: {title}");
	}
	if !config.initial_query.is_empty() {
		println!("  Initial query: {}", config.initial_query);
	}
	println!("  Log level: {}", config.log_level);
	match &config.log_file {
		Some(path) => println!("  Log file: {}", path.display()),
		None => println!("  Log file: (data directory)"),
	}
}

fn describe_location(location: &LocationChoice) -> String {
	match location {
		LocationChoice::Ip { endpoint } => format!("IP lookup via {endpoint}"),
		LocationChoice::Fixed(coordinate) => format!("fixed at {coordinate}"),
		LocationChoice::Disabled => "disabled".to_string(),
	}
}
