//! Canned reply text.

use aphator_classify::Topic;

pub const GREETINGS: &[&str] = &[
    "Hello! Welcome to Aphator Tech. How can I assist you today?",
    "Hi there! I'm the Aphator Tech assistant. What can I help you with?",
    "Welcome to Aphator Tech! I'm here to answer your questions about our crypto and tech services.",
];

pub const FAREWELLS: &[&str] = &[
    "Thank you for chatting with Aphator Tech. Have a great day!",
    "It was a pleasure assisting you. If you have more questions, feel free to ask anytime!",
    "Thank you for considering Aphator Tech. We hope to serve you soon!",
];

pub const FALLBACKS: &[&str] = &[
    "I'm not sure I understand that query. Could you please rephrase it or ask about our crypto or tech services?",
    "I don't have information on that specific topic. Would you like to know about our crypto solutions or tech services instead?",
    "I'm still learning and don't have an answer for that yet. Can I tell you about Aphator Tech's expertise in blockchain or development services?",
];

/// Follow-up questions appended by the engagement injector. `{topic}` is
/// replaced with the topic label.
pub const ENGAGEMENT_TEMPLATES: &[&str] = &[
    "Would you like to know more about how our {topic} solutions can benefit your business?",
    "Have you considered implementing {topic} technology in your organization?",
    "Many of our clients have seen significant results with our {topic} services. Would you like to hear about some case studies?",
    "What specific aspects of {topic} are you most interested in?",
    "Is there a particular challenge with {topic} that you're looking to solve?",
];

/// Appended to a greeting when the session already has a dominant interest.
pub fn greeting_continuation(interest: &str) -> String {
    format!(" I see you're interested in {interest}. How can I help you with that today?")
}

pub const CAPABILITIES: &str = "I can help you with information about Aphator Tech's products and services. \
     We specialize in blockchain development, cryptocurrency trading solutions, Web3 integration, \
     NFT development, cybersecurity for crypto, and custom software development. \
     How can I assist you specifically today?";

pub const BUILD_APPLICATION: &str = "Aphator Tech can help you develop your application or software project. Our development team \
     creates custom solutions for various platforms including web, mobile, and enterprise systems. \
     Application development starts at $10,000, with the exact price depending on your specific requirements. \
     Would you like to tell me more about your project?";

pub const BUILD_BLOCKCHAIN: &str = "Aphator Tech specializes in blockchain development. We can help you build custom blockchain solutions, \
     smart contracts, DApps, or handle tokenization services. Our blockchain services start at $5,000, \
     and we work with various blockchain protocols including Ethereum, Solana, and Binance Smart Chain. \
     What kind of blockchain project are you looking to develop?";

pub const BUILD_TRADING: &str = "For cryptocurrency trading and investment solutions, Aphator Tech offers custom trading bots, \
     market analysis tools, and portfolio management systems. Our TradeBotX product ($59.99/month) provides \
     automated trading capabilities with strategy building and risk management features. \
     Would you like more information about our trading solutions?";

pub const CRYPTO_TRACKER: &str = "CryptoTracker Pro is Aphator Tech's all-in-one cryptocurrency portfolio tracking and management solution. \
     It offers multi-wallet support, real-time price updates, performance analytics, and tax reporting tools. \
     It's available for $29.99/month. Would you like more details about its features?";

pub const BLOCK_SECURE: &str = "BlockSecure is our comprehensive security solution for blockchain assets. It includes multi-signature \
     wallet implementation, automated security audits, threat detection and alerts, and secure backup solutions. \
     Available for $49.99/month. Would you like to learn more about how it can protect your crypto assets?";

pub const SMART_CONTRACT_BUILDER: &str = "SmartContract Builder is Aphator Tech's no-code platform for creating smart contracts. It includes a template \
     library, visual contract builder, automated testing, and one-click deployment capabilities. \
     It's priced at $39.99/month. Would you like more information about how it simplifies smart contract development?";

pub const TRADE_BOT_X: &str = "TradeBotX is our automated cryptocurrency trading bot featuring a strategy builder, multi-exchange support, \
     backtesting capabilities, and risk management tools. It's available for $59.99/month. \
     Would you like to know more about how it can optimize your trading strategies?";

pub const BLOCKCHAIN_SERVICE: &str = "Aphator Tech offers comprehensive blockchain development services, including custom blockchain solutions, \
     smart contract creation and auditing, DApp development, tokenization services, and blockchain integration \
     with existing systems. Our team has extensive experience building secure and efficient blockchain applications \
     tailored to specific business needs.";

pub const TRADING_SERVICE: &str = "Our Cryptocurrency Trading Solutions include custom trading bots, market analysis tools, portfolio management \
     systems, trading strategy implementation, and real-time market data integration. We can help optimize \
     your trading operations with cutting-edge technology and expertise in cryptocurrency markets.";

pub const WEB3_SERVICE: &str = "Aphator Tech specializes in Web3 integration services, including wallet integration, decentralized authentication, \
     smart contract interaction, cross-chain compatibility, and gas optimization. We can help connect your \
     existing platforms to the decentralized web and blockchain ecosystems.";

pub const NFT_SERVICE: &str = "Our NFT development services include NFT marketplace development, collection smart contracts, minting tools \
     and platforms, metadata management, and royalty implementation. We can help you create, launch, and \
     manage NFT projects from concept to deployment.";

pub const SECURITY_SERVICE: &str = "Aphator Tech provides specialized Cybersecurity for Crypto services, including wallet security audits, \
     smart contract vulnerability analysis, penetration testing, security protocol implementation, and \
     secure key management solutions. We help protect your digital assets with advanced security measures.";

pub const CONTACT_INFO: &str = "You can reach Aphator Tech through the following channels:\nEmail: info@aphatortech.com\n\
     Support: support@aphatortech.com\nPhone: +1-555-APHATOR\nWebsite: www.aphatortech.com";

pub const APPLICATION_SERVICE: &str = "Aphator Tech provides comprehensive application development services, including mobile applications (iOS/Android), \
     web applications, enterprise systems, and custom software solutions. Our development process includes \
     requirements analysis, design, development, testing, and deployment. Pricing starts at $10,000 for \
     full applications, with the final cost depending on complexity, features, and timeline. Would you like \
     to discuss your specific software needs?";

pub const PRICING_OVERVIEW: &str = "Aphator Tech offers various services and products with different pricing structures. \
     Our software development services start at $10,000 for full applications. \
     Blockchain development starts at $5,000. Our products include CryptoTracker Pro ($29.99/month), \
     BlockSecure ($49.99/month), SmartContract Builder ($39.99/month), and TradeBotX ($59.99/month). \
     We'd be happy to provide a detailed quote based on your specific requirements.";

pub const BLOCKCHAIN_DEEP_DIVE: &str = "Our blockchain development team specializes in EVM-compatible chains like Ethereum, \
     Binance Smart Chain, and Polygon, as well as alternate protocols like Solana and Cosmos. \
     We can develop custom smart contracts, create DApps, handle token issuance, build NFT platforms, \
     and integrate existing applications with blockchain technology. Would you like to schedule \
     a consultation with one of our blockchain specialists?";

pub const TRADING_DEEP_DIVE: &str = "Our trading solutions can be customized to your specific needs and trading style. \
     We can develop algorithmic bots that trade based on technical indicators, implement \
     specific strategies (trend-following, mean reversion, arbitrage, etc.), create real-time \
     portfolio trackers and analytics systems, and integrate with major exchanges. Would you like \
     to discuss what features would be most important for your trading needs?";

pub const APPLICATION_DEEP_DIVE: &str = "Our application development process begins with thorough requirements gathering \
     to ensure we build precisely what you need. We develop mobile apps (native or cross-platform), \
     web applications, enterprise systems, and custom software solutions. Our developers follow \
     industry best practices for secure, scalable, and maintainable code. Would you like to \
     tell me more about the specific application you're looking to build?";

pub const NFT_DEEP_DIVE: &str = "Our NFT development services cover the complete lifecycle from concept to marketplace. \
     This includes creating smart contracts for your collection, implementing minting functionality, \
     managing metadata and assets, building marketplace functionality, and ensuring proper royalty \
     distribution. We've helped launch several successful NFT projects in art, gaming, and utility tokens. \
     Would you like to discuss your specific NFT project ideas?";

pub const SECURITY_DEEP_DIVE: &str = "Our security services include comprehensive audits of smart contracts and blockchain applications, \
     implementation of multi-signature solutions, secure key management systems, vulnerability assessment, \
     penetration testing, and ongoing security monitoring. We help protect your digital assets with \
     industry-leading security practices. Would you like more information about specific security \
     concerns or protocols?";

/// Topic-specific continuation offered after the user accepts an invitation.
pub fn deep_dive(topic: Topic) -> &'static str {
    match topic {
        Topic::Blockchain => BLOCKCHAIN_DEEP_DIVE,
        Topic::CryptoTrading => TRADING_DEEP_DIVE,
        Topic::Application => APPLICATION_DEEP_DIVE,
        Topic::Nft => NFT_DEEP_DIVE,
        Topic::Security => SECURITY_DEEP_DIVE,
    }
}

pub const OPINION: &str = "Based on our extensive experience in the crypto and tech space, Aphator Tech \
     recommends a careful, strategic approach to implementing blockchain and crypto solutions. \
     Security should always be the priority, followed by scalability and user experience. \
     Our experts can provide more specific recommendations based on your unique requirements.";

pub const COMPARISON: &str = "When comparing solutions, Aphator Tech focuses on security, performance, cost-effectiveness, \
     and long-term maintainability. Each technology has its strengths - for example, Ethereum offers \
     robust security and widespread adoption but with higher gas fees, while alternatives like Solana \
     offer higher throughput at potentially lower costs. We can help you evaluate the best fit for your specific needs.";

pub const PROBLEM: &str = "Aphator Tech specializes in solving complex technical challenges in the crypto and blockchain space. \
     Common issues we address include smart contract vulnerabilities, blockchain integration difficulties, \
     scalability bottlenecks, and security concerns. Our team can analyze your specific problem and develop \
     a tailored solution. Could you tell me more about the specific challenge you're facing?";

pub const CLARIFICATION: &str = "I'd be happy to clarify any information about Aphator Tech's services or crypto technology in general. \
     We aim to make complex technical concepts accessible and understandable. Could you specify which \
     aspect you'd like me to explain in more detail?";

pub const LEARNING: &str = "I'm designed to learn and improve as I interact with more questions. While I don't have training capabilities \
     in the traditional sense, the Aphator Tech team regularly updates my knowledge base to better assist with questions \
     about our crypto and tech services. Is there something specific about Aphator Tech you'd like to know?";

pub const APOLOGETIC_FALLBACK: &str = "I apologize for not understanding your question correctly. \
     Aphator Tech specializes in blockchain development, crypto trading solutions, application development, \
     NFT platforms, and security services. Could you please rephrase your question or specify which \
     of our services you're interested in learning more about?";
