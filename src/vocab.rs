//! Fixed value lists accepted by the API.

pub const ORIENTATIONS: &[&str] = &["rtl", "ltr", "ttb"];

pub const STATUSES: &[&str] = &["Releasing", "Completed", "Cancelled", "Hiatus", "Licensed"];

pub const COUNTRIES: &[&str] = &[
    "Japan",
    "China",
    "Korea",
    "Thailand",
    "Vietnam",
    "Philippines",
    "Indonesia",
];

pub const TAGS: &[&str] = &[
    "Shounen",
    "Seinen",
    "Shoujo",
    "Josei",
    "Ecchi",
    "Gore",
    "Sexual Violence",
    "Smut",
    "4-Koma",
    "Adaptation",
    "Anthology",
    "Award Winning",
    "Doujinshi",
    "Fan Colored",
    "Full Color",
    "Official Colored",
    "Oneshot",
    "User Created",
    "Web Comic",
    "Action",
    "Adventure",
    "Comedy",
    "Crime",
    "Drama",
    "Fantasy",
    "Historical",
    "Horror",
    "Isekai",
    "Magical Girls",
    "Mecha",
    "Medical",
    "Mystery",
    "Philosophical",
    "Psychological",
    "Romance",
    "Sci-Fi",
    "Shoujo Ai",
    "Shounen Ai",
    "Slice of Life",
    "Sports",
    "Superhero",
    "Thriller",
    "Tragedy",
    "Wuxia",
    "Yaoi",
    "Yuri",
    "Aliens",
    "Animals",
    "Cooking",
    "Crossdressing",
    "Delinquents",
    "Demons",
    "Genderswap",
    "Ghosts",
    "Gyaru",
    "Harem",
    "Incest",
    "Loli",
    "Magic",
    "Martial Arts",
    "Military",
    "Monster Girls",
    "Monsters",
    "Music",
    "Ninja",
    "Office Workers",
    "Police",
    "Post-Apocalyptic",
    "Reincarnation",
    "Reverse Harem",
    "Samurai",
    "School Life",
    "Shota",
    "Supernatural",
    "Survival",
    "Time Travel",
    "Traditional Games",
    "Vampires",
    "Video Games",
    "Virtual Reality",
    "Zombies",
];

pub const LANGUAGES: &[&str] = &[
    "Arabic",
    "Bengali",
    "Brazilian",
    "Bulgarian",
    "Chinese",
    "Czech",
    "Danish",
    "Dutch",
    "English",
    "Filipino",
    "French",
    "German",
    "Greek",
    "Hebrew",
    "Hungarian",
    "Indonesian",
    "Italian",
    "Japanese",
    "Korean",
    "Lithuanian",
    "Malay",
    "Other",
    "Persian",
    "Polish",
    "Portuguese",
    "Romanian",
    "Russian",
    "Spanish",
    "Swedish",
    "Thai",
    "Turkish",
    "Vietnamese",
];
