use crate::schema::{
    ConfigPatch, FaceRank, GameConfig, GenrePointBehavior, RunMode, SuccessCondition,
    TrophyPileInitial,
};
use anyhow::{anyhow, Context};

pub const CONFIG_TEXT_TITLE: &str = "Night of the Thirteenth Configuration";

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Renders the copy/paste block. Modifiers keep their sign (`+1`, `-2`).
pub fn export_config_text(config: &GameConfig, mode: RunMode) -> String {
    let pool_ranks = [
        config.include_twos,
        config.include_threes,
        config.include_fours,
        config.include_fives,
    ];
    format!(
        "{CONFIG_TEXT_TITLE}

Basic Settings:
- Mode: {mode}
- Genre Points: {genre_points}
- Genre Point Behavior: {behavior}
- Max Strikes: {max_strikes}
- Max Rounds: {max_rounds}
- Players: {players}
- Success Condition: {condition}

Face Card Modifiers:
- Jack: {jack:+}
- Queen: {queen:+}
- King: {king:+}

Reserve Distribution:
- Success Cards: {success_cards}
- Failure Cards: {failure_cards}
- Low Fallout (1-2): {low}
- High Fallout (3-4): {high}

Trophy Pile Configuration:
- Initial Card: {initial}

Trophy Pile Shuffling:
- After Each Failure: {on_fail}
- After Each Face Card: {on_face}
- After Each Joker: {on_joker}

Threat Deck Configuration:
- Include Aces: {aces}
- Include 2-5s: {two_to_five}
- Initial Face Card: {initial_face}
- Face Card Type: {face_type}

Threat Pool Ranges:
- 1s (Aces): {aces}
- 2s: {twos}
- 3s: {threes}
- 4s: {fours}
- 5s: {fives}
- Pool Size: {pool_size}
- Number Reserve: {reserve} cards",
        mode = mode.label(),
        genre_points = config.genre_points,
        behavior = config.genre_point_behavior.label(),
        max_strikes = config.max_strikes,
        max_rounds = config.max_rounds,
        players = config.num_players,
        condition = config.success_condition.symbol(),
        jack = config.jack_modifier,
        queen = config.queen_modifier,
        king = config.king_modifier,
        success_cards = config.success_number_cards,
        failure_cards = config.failure_number_cards,
        low = config.low_fallout_face_card,
        high = config.high_fallout_face_card,
        initial = config.trophy_pile_initial.label(),
        on_fail = yes_no(config.shuffle_trophy_on_fail),
        on_face = yes_no(config.shuffle_trophy_on_face_card),
        on_joker = yes_no(config.shuffle_trophy_on_joker),
        aces = yes_no(config.include_aces),
        two_to_five = yes_no(pool_ranks.iter().all(|included| *included)),
        initial_face = yes_no(config.include_initial_face_card),
        face_type = config.initial_face_card_type,
        twos = yes_no(config.include_twos),
        threes = yes_no(config.include_threes),
        fours = yes_no(config.include_fours),
        fives = yes_no(config.include_fives),
        pool_size = config.threat_pool_size(),
        reserve = config.number_reserve_size(),
    )
}

fn value_after_colon(line: &str) -> &str {
    line.split_once(':').map(|(_, value)| value.trim()).unwrap_or("")
}

fn first_number<T: std::str::FromStr>(line: &str) -> anyhow::Result<T> {
    line.split(|c: char| !c.is_ascii_digit())
        .find(|digits| !digits.is_empty())
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| anyhow!("no number in {line:?}"))
}

fn signed_value(line: &str) -> anyhow::Result<i32> {
    let value = value_after_colon(line);
    value
        .parse()
        .with_context(|| format!("bad modifier {value:?}"))
}

fn face_value(line: &str) -> anyhow::Result<FaceRank> {
    let value = value_after_colon(line);
    FaceRank::from_letter(value).ok_or_else(|| anyhow!("bad face card {value:?}"))
}

/// Reads the copy/paste block back into a patch. Keys are matched by
/// substring in a fixed order, so the first matching key wins; lines that
/// match nothing are ignored.
pub fn parse_config_text(text: &str) -> anyhow::Result<ConfigPatch> {
    let mut patch = ConfigPatch::default();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        parse_line(line, &mut patch).with_context(|| format!("line {}", index + 1))?;
    }
    Ok(patch)
}

fn parse_line(line: &str, patch: &mut ConfigPatch) -> anyhow::Result<()> {
    let yes = line.contains("Yes");
    if line.contains("Mode:") {
        patch.mode = Some(if line.contains("Multiple") {
            RunMode::Multiple
        } else {
            RunMode::Single
        });
    } else if line.contains("Genre Points:") {
        patch.genre_points = Some(first_number(line)?);
    } else if line.contains("Genre Point Behavior:") {
        let value = value_after_colon(line);
        patch.genre_point_behavior = Some(if value.contains("Reroll +1") {
            GenrePointBehavior::RerollPlusOne
        } else if value.contains("+1 to Main") {
            GenrePointBehavior::PlusOne
        } else {
            GenrePointBehavior::Reroll
        });
    } else if line.contains("Max Strikes:") {
        patch.max_strikes = Some(first_number(line)?);
    } else if line.contains("Max Rounds:") {
        patch.max_rounds = Some(first_number(line)?);
    } else if line.contains("Players:") {
        patch.num_players = Some(first_number(line)?);
    } else if line.contains("Success Condition:") {
        patch.success_condition = Some(if line.contains('≥') {
            SuccessCondition::EqualOrHigher
        } else {
            SuccessCondition::HigherThan
        });
    } else if line.contains("Jack:") {
        patch.jack_modifier = Some(signed_value(line)?);
    } else if line.contains("Queen:") {
        patch.queen_modifier = Some(signed_value(line)?);
    } else if line.contains("King:") {
        patch.king_modifier = Some(signed_value(line)?);
    } else if line.contains("Success Cards:") {
        patch.success_number_cards = Some(first_number(line)?);
    } else if line.contains("Failure Cards:") {
        patch.failure_number_cards = Some(first_number(line)?);
    } else if line.contains("Low Fallout (1-2):") {
        patch.low_fallout_face_card = Some(face_value(line)?);
    } else if line.contains("High Fallout (3-4):") {
        patch.high_fallout_face_card = Some(face_value(line)?);
    } else if line.contains("Initial Card:") {
        let value = value_after_colon(line);
        patch.trophy_pile_initial = Some(if value.contains("Top") {
            TrophyPileInitial::Top
        } else if value.contains("Bottom") {
            TrophyPileInitial::Bottom
        } else {
            TrophyPileInitial::None
        });
    } else if line.contains("After Each Failure:") {
        patch.shuffle_trophy_on_fail = Some(yes);
    } else if line.contains("After Each Face Card:") {
        patch.shuffle_trophy_on_face_card = Some(yes);
    } else if line.contains("After Each Joker:") {
        patch.shuffle_trophy_on_joker = Some(yes);
    } else if line.contains("Include Aces:") || line.contains("1s (Aces):") {
        patch.include_aces = Some(yes);
    } else if line.contains("Include 2-5s:") {
        patch.include_twos = Some(yes);
        patch.include_threes = Some(yes);
        patch.include_fours = Some(yes);
        patch.include_fives = Some(yes);
    } else if line.contains("Initial Face Card:") {
        patch.include_initial_face_card = Some(yes);
    } else if line.contains("Face Card Type:") {
        patch.initial_face_card_type = Some(face_value(line)?);
    } else if line.contains("2s:") {
        patch.include_twos = Some(yes);
    } else if line.contains("3s:") {
        patch.include_threes = Some(yes);
    } else if line.contains("4s:") {
        patch.include_fours = Some(yes);
    } else if line.contains("5s:") {
        patch.include_fives = Some(yes);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Preset;

    #[test]
    fn export_matches_known_layout() {
        let text = export_config_text(&Preset::Fallback.config(), RunMode::Single);
        assert!(text.starts_with("Night of the Thirteenth Configuration\n\nBasic Settings:\n"));
        assert!(text.contains("- Genre Point Behavior: Reroll\n"));
        assert!(text.contains("- Success Condition: ≥\n"));
        assert!(text.contains("- Jack: +1\n"));
        assert!(text.contains("- Initial Card: Top of Reserve\n"));
        assert!(text.contains("- After Each Joker: Yes\n"));
        assert!(text.contains("- Pool Size: 21\n"));
        assert!(text.ends_with("- Number Reserve: 20 cards"));
    }

    #[test]
    fn export_then_parse_restores_every_preset() {
        for preset in Preset::ALL {
            let config = preset.config();
            let text = export_config_text(&config, RunMode::Multiple);
            let patch = parse_config_text(&text).expect("parse");
            assert_eq!(patch.mode, Some(RunMode::Multiple));
            let mut restored = Preset::Fallback.config();
            restored.include_fives = !config.include_fives;
            patch.apply(&mut restored);
            assert_eq!(restored, config, "{preset}");
        }
    }

    #[test]
    fn negative_modifiers_survive() {
        let mut config = Preset::Fallback.config();
        config.queen_modifier = -2;
        let text = export_config_text(&config, RunMode::Single);
        assert!(text.contains("- Queen: -2\n"));
        let patch = parse_config_text(&text).expect("parse");
        assert_eq!(patch.queen_modifier, Some(-2));
    }

    #[test]
    fn unknown_lines_are_ignored() {
        let patch = parse_config_text("hello\n# comment\n- Max Strikes: 5\n- Vibes: eerie\n")
            .expect("parse");
        assert_eq!(
            patch,
            ConfigPatch {
                max_strikes: Some(5),
                ..ConfigPatch::default()
            }
        );
    }

    #[test]
    fn initial_card_line_is_not_the_face_card_toggle() {
        let patch =
            parse_config_text("- Initial Card: None\n- Initial Face Card: No").expect("parse");
        assert_eq!(patch.trophy_pile_initial, Some(TrophyPileInitial::None));
        assert_eq!(patch.include_initial_face_card, Some(false));
    }

    #[test]
    fn two_to_five_toggle_is_overridden_by_ranges() {
        let patch = parse_config_text("- Include 2-5s: Yes\n- 5s: No").expect("parse");
        assert_eq!(patch.include_twos, Some(true));
        assert_eq!(patch.include_fives, Some(false));
    }

    #[test]
    fn malformed_number_reports_line() {
        let err = parse_config_text("\n- Max Rounds: lots").expect_err("should fail");
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn bad_face_letter_fails() {
        assert!(parse_config_text("- Low Fallout (1-2): A").is_err());
    }
}
