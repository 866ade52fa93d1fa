//! Quotes shown in rotation while a savings goal is in progress.

/// How often the page asks for the next quote.
pub const QUOTE_ROTATION_SECONDS: u32 = 10;

/// A saying and who it is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub const QUOTES: [Quote; 10] = [
    Quote {
        text: "Do not save what is left after spending, but spend what is left after saving.",
        author: "Warren Buffett",
    },
    Quote {
        text: "A penny saved is a penny earned.",
        author: "Benjamin Franklin",
    },
    Quote {
        text: "Saving must become a priority, not just a thought. Pay yourself first.",
        author: "Dave Ramsey",
    },
    Quote {
        text: "Beware of little expenses; a small leak will sink a great ship.",
        author: "Benjamin Franklin",
    },
    Quote {
        text: "Do not save money, save yourself first, then your money will save you.",
        author: "Mokokoma Mokhonoana",
    },
    Quote {
        text: "The habit of saving is itself an education; it fosters every virtue, teaches \
            self-denial, cultivates the sense of order, trains to forethought, and so broadens \
            the mind.",
        author: "T.T. Munger",
    },
    Quote {
        text: "It is not your salary that makes you rich, it's your spending habits.",
        author: "Charles A. Jaffe",
    },
    Quote {
        text: "A man who both spends and saves money is the happiest man, because he has both \
            enjoyments.",
        author: "Samuel Johnson",
    },
    Quote {
        text: "The art is not in making money, but in keeping it.",
        author: "Proverb",
    },
    Quote {
        text: "Try to save something while your salary is small; it's impossible to save after \
            you begin to earn more.",
        author: "Jack Benny",
    },
];

/// The quote at `index`, wrapping around after the last one.
pub fn quote_at(index: usize) -> Quote {
    QUOTES[index % QUOTES.len()]
}

/// The index of the quote to show after the one at `index`.
pub fn next_quote_index(index: usize) -> usize {
    (index % QUOTES.len() + 1) % QUOTES.len()
}
