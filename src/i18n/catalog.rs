//! Static translation table shipped with the plugin

/// (context, [(source message, translation)])
pub(super) type ContextTable = (&'static str, &'static [(&'static str, &'static str)]);

/// locale -> contexts, in the order locales are advertised
pub(super) static CATALOG: &[(&str, &[ContextTable])] = &[
  (
    "ja",
    &[
      (
        "LegendView",
        &[
          ("&凡例表示", "&凡例表示"),
          ("凡例", "凡例"),
          ("シンボル", "シンボル"),
          ("その他の値", "その他の値"),
        ],
      ),
      (
        "LegendViewDockWidgetBase",
        &[
          ("凡例表示", "凡例表示"),
          ("レイヤ名", "レイヤ名"),
          ("不透明度", "不透明度"),
          ("スタイル", "スタイル"),
        ],
      ),
    ],
  ),
  (
    "en",
    &[
      (
        "LegendView",
        &[
          ("&凡例表示", "&Legend View"),
          ("凡例", "Legend"),
          ("シンボル", "Symbol"),
          ("その他の値", "Other values"),
        ],
      ),
      (
        "LegendViewDockWidgetBase",
        &[
          ("凡例表示", "Legend View"),
          ("レイヤ名", "Layer Name"),
          ("不透明度", "Opacity"),
          ("スタイル", "Style"),
        ],
      ),
    ],
  ),
];

/// Locale used by the plugin when none is configured
pub const DEFAULT_LOCALE: &str = "ja";

/// Translate `message` in `context` for `locale`.
///
/// Unknown locale, context or message yields `message` unchanged.
pub fn translate<'a>(context: &str, message: &'a str, locale: &str) -> &'a str {
  CATALOG
    .iter()
    .find(|(code, _)| *code == locale)
    .and_then(|(_, contexts)| contexts.iter().find(|(name, _)| *name == context))
    .and_then(|(_, messages)| messages.iter().find(|(source, _)| *source == message))
    .map(|(_, translated)| *translated)
    .unwrap_or(message)
}

/// Locale codes with a translation table, in catalogue order
pub fn available_locales() -> Vec<&'static str> {
  CATALOG.iter().map(|(code, _)| *code).collect()
}

/// Every (context, source, translation) triple for `locale`
pub fn entries(locale: &str) -> Vec<(&'static str, &'static str, &'static str)> {
  CATALOG
    .iter()
    .filter(|(code, _)| *code == locale)
    .flat_map(|(_, contexts)| contexts.iter())
    .flat_map(|(context, messages)| messages.iter().map(move |(source, target)| (*context, *source, *target)))
    .collect()
}
