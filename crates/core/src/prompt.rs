//! Generation prompt composition.
//!
//! Builds the instruction text sent to the panel image service: art style,
//! scene description, a character-consistency block, and the fixed visual
//! quality directives every panel shares.

use crate::characters::{CharacterEntry, CharacterMap};

/// Characters whose name appears (case-insensitively) in the scene text.
///
/// Only these characters' descriptions are injected into a generation
/// prompt; the rest of the roster is irrelevant to the scene and would
/// just dilute the instructions.
pub fn mentioned_characters<'a>(
    scene_description: &str,
    characters: &'a CharacterMap,
) -> Vec<(&'a str, &'a CharacterEntry)> {
    let scene_lower = scene_description.to_lowercase();
    characters
        .iter()
        .filter(|(name, _)| scene_lower.contains(&name.to_lowercase()))
        .collect()
}

/// Prompt for generating a fresh panel.
pub fn generation_prompt(scene_description: &str, characters: &CharacterMap, style: &str) -> String {
    let consistency = consistency_block(mentioned_characters(scene_description, characters));

    format!(
        "Create a comic book panel in {style} style.\n\
         \n\
         SCENE DESCRIPTION: {scene_description}\n\
         {consistency}\
         VISUAL REQUIREMENTS:\n\
         - Comic book panel format with clear black borders\n\
         - Maintain consistent character appearance if characters are mentioned\n\
         - {style} art style throughout\n\
         - High quality detailed illustration\n\
         - Professional comic book quality\n\
         - Clear visual storytelling\n\
         - Appropriate for all ages\n"
    )
}

/// Prompt for regenerating an existing panel from an edit instruction.
///
/// Unlike generation, the full character roster is included unfiltered:
/// after an edit there is no reliable way to tell which characters remain
/// relevant, so all of them are kept in play.
pub fn edit_prompt(
    edit_instruction: &str,
    original_description: &str,
    characters: &CharacterMap,
    style: &str,
) -> String {
    let consistency = consistency_block(characters.iter().collect());

    format!(
        "Create a modified comic book panel in {style} style based on this \
         editing instruction: {edit_instruction}\n\
         \n\
         ORIGINAL SCENE: {original_description}\n\
         {consistency}\
         EDITING INSTRUCTION: {edit_instruction}\n\
         \n\
         VISUAL REQUIREMENTS:\n\
         - Apply the requested changes while maintaining overall composition\n\
         - Maintain exact character consistency if characters are present\n\
         - Keep {style} art style throughout\n\
         - Comic book panel format with clear black borders\n\
         - High quality detailed illustration\n\
         - Professional comic book quality\n"
    )
}

fn consistency_block(characters: Vec<(&str, &CharacterEntry)>) -> String {
    if characters.is_empty() {
        return String::new();
    }

    let mut block = String::from("\nCHARACTER CONSISTENCY REQUIREMENTS:\n");
    for (name, entry) in characters {
        block.push_str(&format!("- {name}: {}\n", entry.description));
    }
    block.push_str(
        "\nIMPORTANT: Maintain exact visual consistency for all named characters across panels.\n\n",
    );
    block
}
