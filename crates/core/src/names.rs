//! Random archive names
//!
//! Names look like `focused_turing`: an adjective and the surname of a
//! notable scientist or hacker, joined by an underscore.

/// Source of human-readable names for archives created without `--name`
pub trait NameGenerator: Send + Sync {
    fn random_name(&self) -> String;
}

const LEFT: &[&str] = &[
    "admiring", "adoring", "affectionate", "agitated", "amazing", "angry", "awesome", "blissful",
    "boring", "brave", "clever", "cocky", "compassionate", "competent", "condescending",
    "confident", "cranky", "dazzling", "determined", "distracted", "dreamy", "eager", "ecstatic",
    "elastic", "elated", "elegant", "eloquent", "epic", "fervent", "festive", "flamboyant",
    "focused", "friendly", "frosty", "gallant", "gifted", "goofy", "gracious", "happy",
    "hardcore", "heuristic", "hopeful", "hungry", "infallible", "inspiring", "jolly", "jovial",
    "keen", "kind", "laughing", "loving", "lucid", "mystifying", "modest", "musing", "naughty",
    "nervous", "nifty", "nostalgic", "objective", "optimistic", "peaceful", "pedantic",
    "pensive", "practical", "priceless", "quirky", "quizzical", "relaxed", "reverent",
    "romantic", "sad", "serene", "sharp", "silly", "sleepy", "stoic", "stupefied", "suspicious",
    "tender", "thirsty", "trusting", "unruffled", "upbeat", "vibrant", "vigilant", "vigorous",
    "wizardly", "wonderful", "xenodochial", "youthful", "zealous", "zen",
];

const RIGHT: &[&str] = &[
    "albattani", "allen", "almeida", "archimedes", "ardinghelli", "aryabhata", "austin",
    "babbage", "banach", "bardeen", "bartik", "bassi", "bell", "bhabha", "bhaskara", "blackwell",
    "bohr", "booth", "borg", "bose", "boyd", "brahmagupta", "brattain", "brown", "carson",
    "chandrasekhar", "clarke", "colden", "cori", "cray", "curie", "darwin", "davinci", "dijkstra",
    "dubinsky", "easley", "edison", "einstein", "elion", "engelbart", "euclid", "euler",
    "fermat", "fermi", "feynman", "franklin", "galileo", "gates", "goldberg", "goldstine",
    "goldwasser", "golick", "goodall", "hamilton", "hawking", "heisenberg", "hermann", "heyrovsky",
    "hodgkin", "hoover", "hopper", "hugle", "hypatia", "jang", "jennings", "jepsen", "joliot",
    "jones", "kalam", "kare", "keller", "khorana", "kilby", "kirch", "knuth", "kowalevski",
    "lalande", "lamarr", "lamport", "leakey", "leavitt", "lewin", "lichterman", "liskov",
    "lovelace", "lumiere", "mahavira", "mayer", "mccarthy", "mcclintock", "mclean", "mcnulty",
    "meitner", "meninsky", "mestorf", "minsky", "mirzakhani", "morse", "murdock", "newton",
    "nightingale", "nobel", "noether", "northcutt", "noyce", "panini", "pare", "pasteur",
    "payne", "perlman", "pike", "poincare", "poitras", "ptolemy", "raman", "ramanujan", "ride",
    "ritchie", "roentgen", "rosalind", "saha", "sammet", "shaw", "shirley", "shockley",
    "sinoussi", "snyder", "spence", "stallman", "stonebraker", "swanson", "swartz", "swirles",
    "tesla", "thompson", "torvalds", "turing", "varahamihira", "visvesvaraya", "volhard",
    "wescoff", "williams", "wilson", "wing", "wozniak", "wright", "yalow", "yonath",
];

/// `NameGenerator` backed by fixed word lists
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNames;

impl NameGenerator for RandomNames {
    fn random_name(&self) -> String {
        loop {
            let left = LEFT[fastrand::usize(..LEFT.len())];
            let right = RIGHT[fastrand::usize(..RIGHT.len())];
            // Steve Wozniak is not boring
            if left == "boring" && right == "wozniak" {
                continue;
            }
            return format!("{left}_{right}");
        }
    }
}
