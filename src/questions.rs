//! Static question pools sampled at the start of every round.

pub struct TriviaPrompt {
    pub text: &'static str,
    pub options: [&'static str; 4],
    pub correct_answer: &'static str,
}

pub const QUESTIONNAIRE_PROMPTS: &[&str] = &[
    "What's your favorite movie genre?",
    "If you could travel anywhere, where would you go?",
    "What's your ideal weekend activity?",
    "What's your favorite type of food?",
    "What's your biggest fear?",
    "What's your dream job?",
    "What's your favorite season?",
    "What's your go-to karaoke song?",
    "What's your favorite hobby?",
    "What's your most embarrassing moment?",
    "What's your favorite book genre?",
    "What's your favorite way to relax?",
    "What's your favorite sport?",
    "What's your favorite type of music?",
    "What's your favorite holiday?",
];

pub const TRIVIA_PROMPTS: &[TriviaPrompt] = &[
    TriviaPrompt {
        text: "What is the capital of Australia?",
        options: ["Sydney", "Melbourne", "Canberra", "Perth"],
        correct_answer: "Canberra",
    },
    TriviaPrompt {
        text: "Who painted the Mona Lisa?",
        options: [
            "Vincent van Gogh",
            "Pablo Picasso",
            "Leonardo da Vinci",
            "Michelangelo",
        ],
        correct_answer: "Leonardo da Vinci",
    },
    TriviaPrompt {
        text: "What is the smallest prime number?",
        options: ["0", "1", "2", "3"],
        correct_answer: "2",
    },
    TriviaPrompt {
        text: "In which year did World War II end?",
        options: ["1943", "1944", "1945", "1946"],
        correct_answer: "1945",
    },
    TriviaPrompt {
        text: "What is the chemical symbol for gold?",
        options: ["Go", "Gd", "Au", "Ag"],
        correct_answer: "Au",
    },
    TriviaPrompt {
        text: "Which planet is known as the Red Planet?",
        options: ["Venus", "Mars", "Jupiter", "Saturn"],
        correct_answer: "Mars",
    },
    TriviaPrompt {
        text: "What is the longest river in the world?",
        options: ["Amazon", "Nile", "Mississippi", "Yangtze"],
        correct_answer: "Nile",
    },
    TriviaPrompt {
        text: "Who wrote '1984'?",
        options: ["George Orwell", "Aldous Huxley", "Ray Bradbury", "H.G. Wells"],
        correct_answer: "George Orwell",
    },
    TriviaPrompt {
        text: "What is the speed of light in vacuum (approximately)?",
        options: ["300,000 km/s", "150,000 km/s", "450,000 km/s", "600,000 km/s"],
        correct_answer: "300,000 km/s",
    },
    TriviaPrompt {
        text: "Which ocean is the largest?",
        options: ["Atlantic", "Indian", "Arctic", "Pacific"],
        correct_answer: "Pacific",
    },
    TriviaPrompt {
        text: "What is the hardest natural substance on Earth?",
        options: ["Gold", "Diamond", "Platinum", "Titanium"],
        correct_answer: "Diamond",
    },
    TriviaPrompt {
        text: "In which country would you find Mount Kilimanjaro?",
        options: ["Kenya", "Tanzania", "Uganda", "Ethiopia"],
        correct_answer: "Tanzania",
    },
    TriviaPrompt {
        text: "What is the largest mammal in the world?",
        options: ["African Elephant", "Blue Whale", "Giraffe", "Polar Bear"],
        correct_answer: "Blue Whale",
    },
    TriviaPrompt {
        text: "Who discovered penicillin?",
        options: [
            "Louis Pasteur",
            "Alexander Fleming",
            "Marie Curie",
            "Robert Koch",
        ],
        correct_answer: "Alexander Fleming",
    },
    TriviaPrompt {
        text: "What is the square root of 144?",
        options: ["10", "11", "12", "13"],
        correct_answer: "12",
    },
    TriviaPrompt {
        text: "Which gas makes up most of Earth's atmosphere?",
        options: ["Oxygen", "Carbon Dioxide", "Nitrogen", "Argon"],
        correct_answer: "Nitrogen",
    },
    TriviaPrompt {
        text: "What is the capital of Brazil?",
        options: ["São Paulo", "Rio de Janeiro", "Brasília", "Salvador"],
        correct_answer: "Brasília",
    },
    TriviaPrompt {
        text: "How many continents are there?",
        options: ["5", "6", "7", "8"],
        correct_answer: "7",
    },
    TriviaPrompt {
        text: "What is the largest organ in the human body?",
        options: ["Liver", "Lung", "Skin", "Intestine"],
        correct_answer: "Skin",
    },
    TriviaPrompt {
        text: "Who was the first person to walk on the moon?",
        options: [
            "Buzz Aldrin",
            "Neil Armstrong",
            "Michael Collins",
            "John Glenn",
        ],
        correct_answer: "Neil Armstrong",
    },
];
