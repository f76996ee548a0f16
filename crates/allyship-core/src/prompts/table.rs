//! Built-in prompt pools.

use super::Theme::{Advocacy, Belonging, Bias, Inclusion, Visibility};
use super::{PromptPair, PromptTable};

pub static BUILTIN: PromptTable = PromptTable {
    daily: &DAILY,
    few_days: &FEW_DAYS,
    week: &WEEK,
};

static DAILY: [PromptPair; 14] = [
    PromptPair {
        reflection: "Who did you notice on the edge of a conversation today, and what kept them there?",
        action: "Invite one quieter colleague into the next discussion by name.",
        themes: &[Belonging, Inclusion],
    },
    PromptPair {
        reflection: "When did a first impression shape how you treated someone today?",
        action: "Write down one assumption you made and one question that would test it.",
        themes: &[Bias],
    },
    PromptPair {
        reflection: "Whose work went unmentioned in a meeting or thread you were part of?",
        action: "Credit that person publicly, in the same channel the work was discussed.",
        themes: &[Visibility, Advocacy],
    },
    PromptPair {
        reflection: "Where did you speak when listening might have helped more?",
        action: "In your next meeting, let two others speak before you add your view.",
        themes: &[Inclusion],
    },
    PromptPair {
        reflection: "What helped you feel you belonged somewhere, and who might be missing that today?",
        action: "Send a short check-in message to someone new to your team.",
        themes: &[Belonging],
    },
    PromptPair {
        reflection: "Which idea did you dismiss quickly, and whose idea was it?",
        action: "Revisit that idea and ask its author to say more about it.",
        themes: &[Bias, Inclusion],
    },
    PromptPair {
        reflection: "Who would benefit from an introduction you are in a position to make?",
        action: "Make one introduction that opens a door for someone else.",
        themes: &[Advocacy, Visibility],
    },
    PromptPair {
        reflection: "What language did you use today that might not land the same way for everyone?",
        action: "Swap one habitual phrase for a more inclusive alternative tomorrow.",
        themes: &[Inclusion, Bias],
    },
    PromptPair {
        reflection: "When did you stay silent about something that did not sit right with you?",
        action: "Plan the sentence you would say if it happens again.",
        themes: &[Advocacy],
    },
    PromptPair {
        reflection: "Whose perspective was absent from a decision you saw made today?",
        action: "Ask who else should be consulted before the decision is final.",
        themes: &[Inclusion, Belonging],
    },
    PromptPair {
        reflection: "Who did you interrupt, or who did you see being interrupted?",
        action: "Next time, say \"I'd like to hear the end of that thought.\"",
        themes: &[Visibility, Bias],
    },
    PromptPair {
        reflection: "What did someone share about themselves that you can remember and honour?",
        action: "Follow up on one personal detail a colleague mentioned.",
        themes: &[Belonging],
    },
    PromptPair {
        reflection: "Which routine task lands on the same people every time?",
        action: "Volunteer for that task or suggest a rotation.",
        themes: &[Bias, Advocacy],
    },
    PromptPair {
        reflection: "What small moment today made you feel seen?",
        action: "Create that same moment for someone else before the week ends.",
        themes: &[],
    },
];

static FEW_DAYS: [PromptPair; 10] = [
    PromptPair {
        reflection: "Over the last few days, whose contributions did you amplify, and whose did you miss?",
        action: "Name one missed contribution in your next update.",
        themes: &[Visibility],
    },
    PromptPair {
        reflection: "Which meetings this week had the same voices every time?",
        action: "Suggest a round-robin or written input for the next one.",
        themes: &[Inclusion],
    },
    PromptPair {
        reflection: "What pattern did you notice in who gets asked for opinions and who gets asked for help?",
        action: "Ask someone usually asked for help what they think instead.",
        themes: &[Bias, Visibility],
    },
    PromptPair {
        reflection: "Where could your access or seniority remove a barrier for someone else?",
        action: "Use that access once this week on someone else's behalf.",
        themes: &[Advocacy],
    },
    PromptPair {
        reflection: "Who has not been included in informal plans lately?",
        action: "Extend an invitation to coffee, lunch, or a walk.",
        themes: &[Belonging, Inclusion],
    },
    PromptPair {
        reflection: "When did you change your mind about someone recently, and why?",
        action: "Notice what evidence you needed, and whether you ask the same of everyone.",
        themes: &[Bias],
    },
    PromptPair {
        reflection: "What feedback did you give recently, and would you have phrased it the same way for anyone?",
        action: "Review one piece of feedback for consistency before you send it.",
        themes: &[Bias, Inclusion],
    },
    PromptPair {
        reflection: "Whose growth could you sponsor, not just mentor?",
        action: "Recommend that person for a visible opportunity.",
        themes: &[Advocacy, Visibility],
    },
    PromptPair {
        reflection: "What made a space feel welcoming or unwelcoming to you this week?",
        action: "Change one thing about a space you shape.",
        themes: &[Belonging],
    },
    PromptPair {
        reflection: "What did you learn from someone whose background differs from yours?",
        action: "Thank them and tell them what you took away.",
        themes: &[],
    },
];

static WEEK: [PromptPair; 8] = [
    PromptPair {
        reflection: "Looking back on the week, when did you act as an ally, and when did you hold back?",
        action: "Choose one moment you held back and plan a different response.",
        themes: &[Advocacy],
    },
    PromptPair {
        reflection: "Whose work this week deserves more visibility than it received?",
        action: "Write a short note to their manager or team about it.",
        themes: &[Visibility, Advocacy],
    },
    PromptPair {
        reflection: "Which of your habits this week helped others feel they belonged?",
        action: "Keep one habit going deliberately next week.",
        themes: &[Belonging],
    },
    PromptPair {
        reflection: "Where did a shortcut in your thinking lead you to an unfair conclusion?",
        action: "Pick one decision next week to slow down and check.",
        themes: &[Bias],
    },
    PromptPair {
        reflection: "Who shaped the decisions you were part of this week, and who did not get to?",
        action: "Propose one change to how input is gathered.",
        themes: &[Inclusion],
    },
    PromptPair {
        reflection: "What did you learn this week about an experience different from your own?",
        action: "Read, watch, or listen to one piece of work by someone with that experience.",
        themes: &[Inclusion, Belonging],
    },
    PromptPair {
        reflection: "When did you notice a gap between your intentions and your impact?",
        action: "Acknowledge the impact directly with the person involved.",
        themes: &[Bias, Belonging],
    },
    PromptPair {
        reflection: "What is one commitment to allyship you want to carry into next week?",
        action: "Put a reminder in your calendar to check on it midweek.",
        themes: &[],
    },
];
