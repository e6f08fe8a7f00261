//! Fixed recommendation text tables, one per tier. The advisor only ever
//! picks one element; the tables themselves are plain data.

pub const TEXT_POSITIVE: &[&str] = &[
    "Absolutely! The universe is clearly signaling 'another round!'",
    "Yes, without a doubt! Your beer senses are tingling for a reason.",
    "Go forth and beer! It's practically your destiny.",
    "Without question, your next beer awaits! Embrace the frothy goodness.",
    "A resounding YES! Your beer-getting skills are in high demand.",
    "The answer is a clear and enthusiastic 'beer, please!'",
    "Oh, without a shadow of a doubt, another beer is the only logical choice.",
    "Yes, yes, and yes! The beer gods have spoken.",
    "Indubitably! Your beer glass is practically begging for a refill.",
    "Affirmative! Your internal beer compass is pointing directly to the fridge.",
    "Without hesitation, another beer is in order! You've earned it.",
    "Yes, of course! Who could possibly deny you another beer?",
];

pub const TEXT_MIDDLE: &[&str] = &[
    "You've clearly mastered the art of beer enjoyment! Perhaps savor this moment before another?",
    "Your enthusiasm is admirable! Maybe a brief pause to appreciate the current brew?",
    "A fine choice indeed! Consider a moment of reflection before diving into the next.",
    "The beer flows strong with you! Perhaps a small interlude to maintain balance?",
    "Your beer prowess is undeniable! A short, strategic pause might be wise.",
    "Excellent selection! Reflect on the current beer's glory before the next quest.",
    "Your beer journey is legendary! A moment of respite could enhance the experience.",
    "Such dedication to beer! A brief pause could make the next one even more delightful.",
    "A true connoisseur! Consider the current beer's nuances before seeking another.",
    "Your beer wisdom shines! A short interval could amplify your appreciation.",
];

pub const TEXT_NEGATIVE: &[&str] = &[
    "You've had a wonderful time! Let's hold onto that feeling and call it a great night.",
    "Perfectly enjoyed! Let's savor the satisfaction and leave it at that.",
    "That was a fantastic round! Perhaps we should conclude on a high note?",
    "You've reached a delightful level of enjoyment! Let's maintain that perfect balance.",
    "A truly excellent experience! It's best to appreciate the peak and stop there.",
    "You've had a great run! Let's finish strong and hold onto the good vibes.",
    "That was a perfect amount of enjoyment! Let's cherish it and end on a good note.",
    "A wonderful time, indeed! Let's preserve this excellent feeling for later.",
    "You've enjoyed your fill! Let's relish the moment and avoid overdoing it.",
    "That was a truly satisfying experience! Let's cap it off and keep it memorable.",
];
