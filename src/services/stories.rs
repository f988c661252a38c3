use rand::seq::SliceRandom;

const HAPPY: &[&str] = &[
    "She danced barefoot in the rain, laughing like the sky was hers.",
    "He watched the sunrise with coffee and peace in his heart.",
    "They reunited after years, and the hug felt like home.",
];

const SAD: &[&str] = &[
    "She deleted the photos but couldn't erase the memories.",
    "He smiled in the group photo, but felt alone inside.",
    "Her voice cracked as she said goodbye for the last time.",
];

const ANXIOUS: &[&str] = &[
    "She rehearsed her lines, palms sweating, mind spinning.",
    "He refreshed his inbox, waiting for the job reply.",
    "The silence before the results felt louder than thunder.",
];

const CALM: &[&str] = &[
    "She painted for hours, lost in the rhythm of color.",
    "The waves whispered peace as he walked the shore.",
    "He journaled slowly, each word grounding his soul.",
];

const EXCITED: &[&str] = &[
    "She jumped when the email said: 'You're selected!'",
    "He packed his bags. Tomorrow, the adventure begins.",
    "She couldn't sleep, imagining the stage lights on her.",
];

const REFLECTIVE: &[&str] = &[
    "She reread her old diary, amazed at her growth.",
    "He forgave himself for the choices that shaped him.",
    "She whispered thanks to the past for teaching her strength.",
];

pub fn stories_for(mood: &str) -> Option<&'static [&'static str]> {
    match mood.trim().to_lowercase().as_str() {
        "happy" => Some(HAPPY),
        "sad" => Some(SAD),
        "anxious" => Some(ANXIOUS),
        "calm" => Some(CALM),
        "excited" => Some(EXCITED),
        "reflective" => Some(REFLECTIVE),
        _ => None,
    }
}

/// A random built-in story for `mood`, or `None` for moods without any.
pub fn random_story(mood: &str) -> Option<&'static str> {
    stories_for(mood)?.choose(&mut rand::thread_rng()).copied()
}
