//! Suggested picker options per tech category.

use crate::models::candidate::TechCategory;

const LANGUAGES: &[&str] = &[
    "Python", "JavaScript", "TypeScript", "Java", "C++", "C#", "C", "Go", "Rust", "PHP", "Ruby",
    "Swift", "Kotlin", "Scala", "R", "MATLAB", "Perl", "Haskell", "Lua", "Dart", "Elixir",
    "Clojure", "F#", "VB.NET", "COBOL", "Fortran", "Assembly", "Other",
];

const FRONTEND: &[&str] = &[
    "React", "Angular", "Vue.js", "Svelte", "Next.js", "Nuxt.js", "Gatsby", "Ember.js",
    "Backbone.js", "jQuery", "Bootstrap", "Tailwind CSS", "Material-UI", "Ant Design",
    "Chakra UI", "Styled Components", "SASS/SCSS", "Less", "Other",
];

const BACKEND: &[&str] = &[
    "Django", "Flask", "FastAPI", "Express.js", "Node.js", "Spring Boot", "Spring MVC",
    "Laravel", "CodeIgniter", "Ruby on Rails", "ASP.NET", ".NET Core", "Gin", "Echo", "Fiber",
    "Actix", "Rocket", "Other",
];

const DATABASES: &[&str] = &[
    "MySQL", "PostgreSQL", "SQLite", "Oracle", "SQL Server", "MariaDB", "MongoDB", "CouchDB",
    "Amazon DocumentDB", "Redis", "Amazon DynamoDB", "Riak", "Cassandra", "HBase", "Neo4j",
    "Amazon Neptune", "ArangoDB", "InfluxDB", "TimescaleDB", "Elasticsearch", "Solr", "Other",
];

const CLOUD: &[&str] = &[
    "Amazon Web Services (AWS)", "Microsoft Azure", "Google Cloud Platform (GCP)", "IBM Cloud",
    "Oracle Cloud", "Alibaba Cloud", "DigitalOcean", "Linode", "Vultr", "Heroku", "Vercel",
    "Netlify", "Railway", "PlanetScale", "Supabase", "Firebase", "Other",
];

const DEVOPS: &[&str] = &[
    "Git", "GitHub", "GitLab", "Bitbucket", "SVN", "Jenkins", "GitHub Actions", "GitLab CI",
    "CircleCI", "Travis CI", "Azure Pipelines", "TeamCity", "Docker", "Kubernetes",
    "Docker Compose", "Podman", "Terraform", "Ansible", "Chef", "Puppet", "CloudFormation",
    "Prometheus", "Grafana", "New Relic", "Datadog", "Splunk", "Other",
];

const MOBILE: &[&str] = &[
    "React Native", "Flutter", "Xamarin", "Ionic", "Cordova/PhoneGap", "iOS (Swift/Objective-C)",
    "Android (Java/Kotlin)", "Unity", "Unreal Engine", "Other",
];

const DATA_SCIENCE: &[&str] = &[
    "Pandas", "NumPy", "Scikit-learn", "TensorFlow", "PyTorch", "Keras", "Apache Spark",
    "Hadoop", "Jupyter", "R Studio", "Tableau", "Power BI", "Looker", "Apache Airflow",
    "Apache Kafka", "Other",
];

const TESTING: &[&str] = &[
    "Jest", "Mocha", "Chai", "Cypress", "Selenium", "Playwright", "Puppeteer", "JUnit", "TestNG",
    "PyTest", "Unittest", "RSpec", "PHPUnit", "Postman", "Insomnia", "Other",
];

const CMS: &[&str] = &[
    "WordPress", "Drupal", "Joomla", "Shopify", "WooCommerce", "Magento", "PrestaShop",
    "Squarespace", "Wix", "Webflow", "Other",
];

const OTHER: &[&str] = &[
    "Machine Learning", "Artificial Intelligence", "Blockchain", "Cryptocurrency", "IoT",
    "AR/VR", "Game Development", "Cybersecurity", "Network Administration",
    "System Administration", "Technical Writing", "UI/UX Design", "Product Management", "Other",
];

pub fn options_for(category: TechCategory) -> &'static [&'static str] {
    match category {
        TechCategory::Languages => LANGUAGES,
        TechCategory::Frontend => FRONTEND,
        TechCategory::Backend => BACKEND,
        TechCategory::Databases => DATABASES,
        TechCategory::Cloud => CLOUD,
        TechCategory::Devops => DEVOPS,
        TechCategory::Mobile => MOBILE,
        TechCategory::DataScience => DATA_SCIENCE,
        TechCategory::Testing => TESTING,
        TechCategory::Cms => CMS,
        TechCategory::Other => OTHER,
    }
}
