//! Testimonial Model

use serde::Serialize;

/// Customer review shown in the rotating testimonial strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub id: u32,
    pub name: &'static str,
    /// 1..=5 stars
    pub rating: u8,
    pub review: &'static str,
    /// Initials rendered in place of a photo
    pub avatar: &'static str,
}

pub const TESTIMONIALS: [Testimonial; 4] = [
    Testimonial {
        id: 1,
        name: "Priya Sharma",
        rating: 5,
        review: "Best café in Kotdwara! The masala chai and samosas are absolutely divine. \
                 The ambiance is so cozy and perfect for catching up with friends.",
        avatar: "PS",
    },
    Testimonial {
        id: 2,
        name: "Rahul Kumar",
        rating: 5,
        review: "Love the coffee here! The cappuccino is perfectly brewed and the staff is \
                 very friendly. Highly recommend the paneer butter masala.",
        avatar: "RK",
    },
    Testimonial {
        id: 3,
        name: "Anjali Verma",
        rating: 5,
        review: "A hidden gem in Uttarakhand! The food is authentic, prices are reasonable, \
                 and the atmosphere is warm and welcoming. My go-to place for breakfast.",
        avatar: "AV",
    },
    Testimonial {
        id: 4,
        name: "Vikram Singh",
        rating: 5,
        review: "Excellent service and delicious food! The biryani and dosa are my favorites. \
                 Great place to relax and enjoy quality time.",
        avatar: "VS",
    },
];
