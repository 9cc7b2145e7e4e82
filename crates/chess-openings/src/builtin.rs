//! Built-in opening catalog.
//!
//! Moves are written in the SAN a standard move generator produces, since
//! detection compares them literally against the played moves.

use crate::opening::{FamousGame, OpeningEntry};

/// Creates the built-in collection of chess openings.
///
/// Covers open games (1.e4 e5), semi-open games, closed games (1.d4 d5),
/// Indian defenses and a few flank openings. The best-known lines carry a
/// fun fact, famous games and a Wikipedia link.
#[must_use]
pub fn builtin_openings() -> Vec<OpeningEntry> {
    let mut openings = Vec::new();

    // ==========================================================================
    // OPEN GAMES (1.e4 e5) - ECO C20-C99
    // ==========================================================================

    openings.push(OpeningEntry::new("C20", "King's Pawn Game", &["e4", "e5"]));

    openings.push(
        OpeningEntry::new("C50", "Italian Game", &["e4", "e5", "Nf3", "Nc6", "Bc4"])
            .with_wiki_url("https://en.wikipedia.org/wiki/Italian_Game")
            .with_fun_fact(
                "The Italian Game is one of the oldest recorded chess openings, dating back to \
                 the 16th century. It was analyzed by Italian masters Greco and Polerio, hence the name.",
            )
            .with_famous_game(FamousGame::new(
                "Adolf Anderssen",
                "Lionel Kieseritzky",
                1851,
                "1-0",
                "London",
                "The \"Immortal Game\" - one of the most famous chess games ever, featuring a \
                 spectacular queen sacrifice",
            )),
    );

    openings.push(
        OpeningEntry::new(
            "C53",
            "Italian Game: Classical Variation",
            &["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"],
        )
        .with_wiki_url("https://en.wikipedia.org/wiki/Giuoco_Piano")
        .with_fun_fact(
            "The Classical Variation, also known as the Giuoco Piano ('Quiet Game'), leads to rich \
             strategic battles where both sides develop naturally before the real fight begins.",
        )
        .with_famous_game(FamousGame::new(
            "Paul Morphy",
            "Duke of Brunswick and Count Isouard",
            1858,
            "1-0",
            "Paris Opera",
            "The famous \"Opera Game\" - Morphy's brilliant attacking display during an opera \
             performance",
        )),
    );

    openings.push(
        OpeningEntry::new(
            "C51",
            "Evans Gambit",
            &["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "b4"],
        )
        .with_wiki_url("https://en.wikipedia.org/wiki/Evans_Gambit")
        .with_fun_fact(
            "Invented by the Welsh sea captain William Davies Evans around 1827, the gambit gives \
             up a pawn for rapid development and a strong centre.",
        )
        .with_famous_game(FamousGame::new(
            "Adolf Anderssen",
            "Jean Dufresne",
            1852,
            "1-0",
            "Berlin",
            "The \"Evergreen Game\", a combination that stayed fresh for generations",
        )),
    );

    openings.push(
        OpeningEntry::new(
            "C55",
            "Two Knights Defense",
            &["e4", "e5", "Nf3", "Nc6", "Bc4", "Nf6"],
        )
        .with_wiki_url("https://en.wikipedia.org/wiki/Two_Knights_Defense"),
    );

    openings.push(
        OpeningEntry::new("C60", "Ruy Lopez", &["e4", "e5", "Nf3", "Nc6", "Bb5"])
            .with_wiki_url("https://en.wikipedia.org/wiki/Ruy_Lopez")
            .with_fun_fact(
                "Named after 16th-century Spanish bishop Ruy L\u{f3}pez de Segura, this opening has \
                 been the backbone of 1.e4 theory for over 400 years. It's known for its deep \
                 strategic complexity.",
            )
            .with_famous_game(FamousGame::new(
                "Wilhelm Steinitz",
                "Johannes Zukertort",
                1886,
                "1-0",
                "World Championship",
                "First official World Championship match, Game 1 - Steinitz demonstrated modern \
                 positional play",
            ))
            .with_famous_game(FamousGame::new(
                "Anatoly Karpov",
                "Viktor Korchnoi",
                1978,
                "1-0",
                "World Championship",
                "Baguio City match known for psychological warfare, featuring brilliant Ruy Lopez \
                 technique",
            )),
    );

    openings.push(
        OpeningEntry::new(
            "C65",
            "Ruy Lopez: Berlin Defense",
            &["e4", "e5", "Nf3", "Nc6", "Bb5", "Nf6"],
        )
        .with_fun_fact(
            "Vladimir Kramnik used the Berlin Wall endgame to neutralize Garry Kasparov's 1.e4 \
             and take the world title in 2000.",
        ),
    );

    openings.push(OpeningEntry::new(
        "C70",
        "Ruy Lopez: Morphy Defense",
        &["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"],
    ));

    openings.push(
        OpeningEntry::new("C45", "Scotch Game", &["e4", "e5", "Nf3", "Nc6", "d4"])
            .with_wiki_url("https://en.wikipedia.org/wiki/Scotch_Game"),
    );

    openings.push(OpeningEntry::new(
        "C47",
        "Four Knights Game",
        &["e4", "e5", "Nf3", "Nc6", "Nc3", "Nf6"],
    ));

    openings.push(
        OpeningEntry::new("C42", "Petrov's Defense", &["e4", "e5", "Nf3", "Nf6"])
            .with_wiki_url("https://en.wikipedia.org/wiki/Petrov%27s_Defence"),
    );

    openings.push(OpeningEntry::new(
        "C41",
        "Philidor Defense",
        &["e4", "e5", "Nf3", "d6"],
    ));

    openings.push(
        OpeningEntry::new("C30", "King's Gambit", &["e4", "e5", "f4"])
            .with_wiki_url("https://en.wikipedia.org/wiki/King%27s_Gambit")
            .with_fun_fact(
                "The King's Gambit was the weapon of choice in the Romantic era, when declining a \
                 sacrifice was considered almost unsporting.",
            ),
    );

    openings.push(OpeningEntry::new(
        "C33",
        "King's Gambit Accepted",
        &["e4", "e5", "f4", "exf4"],
    ));

    openings.push(OpeningEntry::new("C25", "Vienna Game", &["e4", "e5", "Nc3"]));

    // ==========================================================================
    // SEMI-OPEN GAMES (1.e4, other replies) - ECO B00-B99, C00-C19
    // ==========================================================================

    openings.push(
        OpeningEntry::new("B20", "Sicilian Defense", &["e4", "c5"])
            .with_wiki_url("https://en.wikipedia.org/wiki/Sicilian_Defence")
            .with_fun_fact(
                "The Sicilian Defense is the most popular response to 1.e4, favored by aggressive \
                 players seeking winning chances with Black. Bobby Fischer called it 'best by test.'",
            )
            .with_famous_game(FamousGame::new(
                "Garry Kasparov",
                "Veselin Topalov",
                1999,
                "1-0",
                "Wijk aan Zee",
                "Known as \"Kasparov's Immortal\" - one of the greatest attacking games ever played",
            ))
            .with_famous_game(FamousGame::new(
                "Bobby Fischer",
                "Bent Larsen",
                1958,
                "1-0",
                "Portoroz Interzonal",
                "Young Fischer's brilliant tactical masterpiece showcasing the Sicilian's attacking \
                 potential",
            )),
    );

    openings.push(OpeningEntry::new(
        "B22",
        "Sicilian Defense: Alapin Variation",
        &["e4", "c5", "c3"],
    ));

    openings.push(OpeningEntry::new(
        "B23",
        "Sicilian Defense: Closed",
        &["e4", "c5", "Nc3"],
    ));

    openings.push(
        OpeningEntry::new(
            "B90",
            "Sicilian Defense: Najdorf Variation",
            &["e4", "c5", "Nf3", "d6", "d4", "cxd4", "Nxd4", "Nf6", "Nc3", "a6"],
        )
        .with_wiki_url("https://en.wikipedia.org/wiki/Sicilian_Defence,_Najdorf_Variation")
        .with_fun_fact(
            "Named after Miguel Najdorf, it became the lifelong main weapon of both Bobby Fischer \
             and Garry Kasparov.",
        ),
    );

    openings.push(
        OpeningEntry::new(
            "B70",
            "Sicilian Defense: Dragon Variation",
            &["e4", "c5", "Nf3", "d6", "d4", "cxd4", "Nxd4", "Nf6", "Nc3", "g6"],
        )
        .with_fun_fact(
            "The name comes from Black's pawn structure, which reminded Fyodor Dus-Chotimirsky of \
             the constellation Draco.",
        ),
    );

    openings.push(
        OpeningEntry::new("C00", "French Defense", &["e4", "e6"])
            .with_wiki_url("https://en.wikipedia.org/wiki/French_Defence")
            .with_fun_fact(
                "The French Defense owes its name to a correspondence match between London and \
                 Paris in 1834, won by the Parisian players with this opening.",
            ),
    );

    openings.push(OpeningEntry::new(
        "C02",
        "French Defense: Advance Variation",
        &["e4", "e6", "d4", "d5", "e5"],
    ));

    openings.push(
        OpeningEntry::new("B10", "Caro-Kann Defense", &["e4", "c6"])
            .with_wiki_url("https://en.wikipedia.org/wiki/Caro%E2%80%93Kann_Defence")
            .with_fun_fact(
                "Named after Horatio Caro and Marcus Kann, who analyzed it in 1886. It has a \
                 reputation as one of Black's most solid replies to 1.e4.",
            ),
    );

    openings.push(OpeningEntry::new(
        "B12",
        "Caro-Kann Defense: Advance Variation",
        &["e4", "c6", "d4", "d5", "e5"],
    ));

    openings.push(
        OpeningEntry::new("B01", "Scandinavian Defense", &["e4", "d5"])
            .with_wiki_url("https://en.wikipedia.org/wiki/Scandinavian_Defense"),
    );

    openings.push(OpeningEntry::new("B02", "Alekhine's Defense", &["e4", "Nf6"]));

    openings.push(OpeningEntry::new("B06", "Modern Defense", &["e4", "g6"]));

    openings.push(OpeningEntry::new(
        "B07",
        "Pirc Defense",
        &["e4", "d6", "d4", "Nf6", "Nc3", "g6"],
    ));

    // ==========================================================================
    // CLOSED GAMES (1.d4 d5) - ECO D00-D69
    // ==========================================================================

    openings.push(OpeningEntry::new("D00", "Queen's Pawn Game", &["d4", "d5"]));

    openings.push(OpeningEntry::new(
        "D00",
        "Queen's Pawn Game: London System",
        &["d4", "d5", "Bf4"],
    ));

    openings.push(
        OpeningEntry::new("D06", "Queen's Gambit", &["d4", "d5", "c4"])
            .with_wiki_url("https://en.wikipedia.org/wiki/Queen%27s_Gambit")
            .with_fun_fact(
                "Despite its name, the Queen's Gambit isn't a true gambit - Black can hold onto \
                 the pawn safely. It surged in popularity after the 2020 Netflix series 'The \
                 Queen's Gambit.'",
            )
            .with_famous_game(FamousGame::new(
                "Garry Kasparov",
                "Anatoly Karpov",
                1985,
                "1-0",
                "World Championship",
                "Game 16 of their legendary 1985 match, showcasing deep strategic understanding",
            )),
    );

    openings.push(OpeningEntry::new(
        "D20",
        "Queen's Gambit Accepted",
        &["d4", "d5", "c4", "dxc4"],
    ));

    openings.push(OpeningEntry::new(
        "D30",
        "Queen's Gambit Declined",
        &["d4", "d5", "c4", "e6"],
    ));

    openings.push(
        OpeningEntry::new("D10", "Slav Defense", &["d4", "d5", "c4", "c6"])
            .with_wiki_url("https://en.wikipedia.org/wiki/Slav_Defense"),
    );

    // ==========================================================================
    // INDIAN DEFENSES (1.d4 Nf6) - ECO A45-A79, D70-E99
    // ==========================================================================

    openings.push(OpeningEntry::new("A45", "Indian Defense", &["d4", "Nf6"]));

    openings.push(
        OpeningEntry::new("E60", "King's Indian Defense", &["d4", "Nf6", "c4", "g6"])
            .with_wiki_url("https://en.wikipedia.org/wiki/King%27s_Indian_Defence")
            .with_fun_fact(
                "Black lets White build a big centre and then attacks it; both Fischer and \
                 Kasparov relied on it in their most important games.",
            ),
    );

    openings.push(
        OpeningEntry::new(
            "E20",
            "Nimzo-Indian Defense",
            &["d4", "Nf6", "c4", "e6", "Nc3", "Bb4"],
        )
        .with_wiki_url("https://en.wikipedia.org/wiki/Nimzo-Indian_Defence")
        .with_fun_fact(
            "Named after Aron Nimzowitsch, whose ideas on restraint and blockade shaped \
             hypermodern chess.",
        ),
    );

    openings.push(OpeningEntry::new(
        "E12",
        "Queen's Indian Defense",
        &["d4", "Nf6", "c4", "e6", "Nf3", "b6"],
    ));

    openings.push(
        OpeningEntry::new(
            "D80",
            "Gr\u{fc}nfeld Defense",
            &["d4", "Nf6", "c4", "g6", "Nc3", "d5"],
        )
        .with_fun_fact("Introduced by Ernst Gr\u{fc}nfeld in 1922 against Friedrich S\u{e4}misch."),
    );

    openings.push(OpeningEntry::new("A80", "Dutch Defense", &["d4", "f5"]));

    // ==========================================================================
    // FLANK OPENINGS - ECO A00-A39
    // ==========================================================================

    openings.push(
        OpeningEntry::new("A10", "English Opening", &["c4"])
            .with_wiki_url("https://en.wikipedia.org/wiki/English_Opening"),
    );

    openings.push(OpeningEntry::new(
        "A09",
        "R\u{e9}ti Opening",
        &["Nf3", "d5", "c4"],
    ));

    openings.push(OpeningEntry::new("A00", "Polish Opening", &["b4"]));

    openings
}
