// SPDX-License-Identifier: MPL-2.0
//! Fluent translations for the UI.
//!
//! One `.ftl` file per locale is embedded from `assets/i18n/`. The active
//! locale is the first of `--lang`, `[general].language` and the OS locale
//! that has a bundle, matching on the language subtag when the region
//! differs. Keys missing from that bundle fall back to `en-US`, and keys
//! missing everywhere render as `MISSING: <key>`.

use crate::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::BTreeMap;
use unic_langid::{langid, LanguageIdentifier};

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Translations;

const FALLBACK: LanguageIdentifier = langid!("en-US");

type Bundle = FluentBundle<FluentResource>;

pub struct I18n {
    bundles: BTreeMap<String, Bundle>,
    locale: LanguageIdentifier,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("locale", &self.locale.to_string())
            .field("bundles", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl I18n {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let bundles: BTreeMap<String, Bundle> = Translations::iter()
            .filter_map(|name| load_bundle(&name))
            .map(|(locale, bundle)| (locale.to_string(), bundle))
            .collect();

        let available: Vec<LanguageIdentifier> =
            bundles.keys().filter_map(|tag| tag.parse().ok()).collect();
        let preferences = [
            cli_lang,
            config.general.language.clone(),
            sys_locale::get_locale(),
        ];
        let locale = preferences
            .iter()
            .flatten()
            .find_map(|tag| closest_locale(tag, &available))
            .unwrap_or(FALLBACK);

        Self { bundles, locale }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Locales with an embedded bundle, sorted by tag.
    pub fn available_locales(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    #[must_use]
    pub fn tr(&self, key: &str) -> String {
        self.render(key, None)
    }

    /// Renders `key` with string placeables, e.g. `{ $name }`.
    #[must_use]
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for &(name, value) in args {
            fluent_args.set(name, value);
        }
        self.render(key, Some(&fluent_args))
    }

    fn render(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        let chain = [self.locale.to_string(), FALLBACK.to_string()];
        chain
            .iter()
            .filter_map(|tag| self.bundles.get(tag))
            .find_map(|bundle| {
                let pattern = bundle.get_message(key)?.value()?;
                let mut errors = Vec::new();
                let text = bundle.format_pattern(pattern, args, &mut errors);
                errors.is_empty().then(|| text.into_owned())
            })
            .unwrap_or_else(|| format!("MISSING: {key}"))
    }
}

fn load_bundle(file_name: &str) -> Option<(LanguageIdentifier, Bundle)> {
    let locale: LanguageIdentifier = file_name.strip_suffix(".ftl")?.parse().ok()?;
    let file = Translations::get(file_name)?;
    let source = String::from_utf8(file.data.into_owned()).ok()?;
    let resource = FluentResource::try_new(source).ok()?;

    let mut bundle = FluentBundle::new(vec![locale.clone()]);
    // No Unicode isolation marks around placeables.
    bundle.set_use_isolating(false);
    bundle.add_resource(resource).ok()?;
    Some((locale, bundle))
}

/// `fr_CA` and `fr-CA` both resolve to `fr` when only `fr` is available.
fn closest_locale(tag: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    let wanted: LanguageIdentifier = tag.replace('_', "-").parse().ok()?;
    available
        .iter()
        .find(|candidate| **candidate == wanted)
        .or_else(|| available.iter().find(|c| c.language == wanted.language))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> I18n {
        I18n::new(Some("en-US".to_owned()), &Config::default())
    }

    fn id(tag: &str) -> LanguageIdentifier {
        tag.parse().expect("valid tag")
    }

    #[test]
    fn region_variants_match_language_bundle() {
        let available = [id("en-US"), id("fr")];
        assert_eq!(closest_locale("fr_CA", &available), Some(id("fr")));
        assert_eq!(closest_locale("en-US", &available), Some(id("en-US")));
        assert_eq!(closest_locale("en-GB", &available), Some(id("en-US")));
        assert_eq!(closest_locale("de", &available), None);
    }

    #[test]
    fn cli_beats_config_language() {
        let mut config = Config::default();
        config.general.language = Some("en-US".to_owned());
        let i18n = I18n::new(Some("fr".to_owned()), &config);
        assert_eq!(i18n.current_locale(), &id("fr"));
    }

    #[test]
    fn config_language_is_used_without_cli() {
        let mut config = Config::default();
        config.general.language = Some("fr".to_owned());
        assert_eq!(I18n::new(None, &config).current_locale(), &id("fr"));
    }

    #[test]
    fn both_locales_are_embedded() {
        let i18n = english();
        let tags: Vec<&str> = i18n.available_locales().collect();
        assert_eq!(tags, ["en-US", "fr"]);
    }

    #[test]
    fn unknown_key_is_flagged() {
        assert_eq!(english().tr("no-such-key"), "MISSING: no-such-key");
    }

    #[test]
    fn placeables_are_filled_in() {
        assert_eq!(
            english().tr_with_args("photographer-credit", &[("name", "Ansel Adams")]),
            "Photographer: Ansel Adams"
        );
    }

    #[test]
    fn french_differs_from_english() {
        let french = I18n::new(Some("fr".to_owned()), &Config::default());
        assert_ne!(french.tr("search-button"), english().tr("search-button"));
    }

    #[test]
    fn french_file_covers_every_english_key() {
        let keys = |name: &str| -> Vec<String> {
            let file = Translations::get(name).expect("embedded");
            String::from_utf8_lossy(&file.data)
                .lines()
                .filter(|line| !line.starts_with(['#', ' ']))
                .filter_map(|line| line.split_once(" ="))
                .map(|(key, _)| key.trim().to_owned())
                .collect()
        };
        let french = keys("fr.ftl");
        for key in keys("en-US.ftl") {
            assert!(french.contains(&key), "fr.ftl lacks {key}");
        }
    }
}
